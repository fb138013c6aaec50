//! Environment source: REPOFS_<SECTION>__<KEY>, e.g. REPOFS_REMOTE__REPOSITORY_URL

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("REPOFS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
