use crate::cli::{ConfigArgs, GlobalArgs};
use crate::config::AppConfig;

pub async fn execute(global: GlobalArgs, args: ConfigArgs) -> anyhow::Result<()> {
    let path = global.config.as_deref();
    match args.action {
        crate::cli::ConfigAction::Show => {
            let cfg = AppConfig::load_or_default(path)?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
        crate::cli::ConfigAction::Set { key, value } => {
            let mut cfg = AppConfig::load_or_default(path)?;
            cfg.set(&key, &value)?;
            cfg.save(path)?;
            println!("Configuration updated.");
        }
    }
    Ok(())
}
