use crate::ui::messages::info;
use serde_yaml::Value;
use std::fs;
use std::io;

/// Keys added after the first release, with their default YAML values.
/// Config files written by older versions are healed in place.
const ADDED_KEYS: [(&str, fn() -> Value); 3] = [
    ("currency", || Value::String("EUR".to_string())),
    ("show_weekday", || Value::Bool(true)),
    ("confirm_destructive", || Value::Bool(true)),
];

/// Report which of the newer keys are absent from the config file,
/// without touching it. Used by `config --check`.
pub fn missing_keys() -> io::Result<Vec<&'static str>> {
    let conf_file = super::Config::config_file();
    if !conf_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&conf_file)?;
    let yaml: Value = match serde_yaml::from_str(&content) {
        Ok(y) => y,
        Err(_) => return Ok(Vec::new()),
    };
    let Some(map) = yaml.as_mapping() else {
        return Ok(Vec::new());
    };

    Ok(ADDED_KEYS
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !map.contains_key(&Value::String(name.to_string())))
        .collect())
}

/// Add any missing keys to the YAML config file. No-op when the file does
/// not exist or already carries every key. Runs before anything reads the
/// config, so older config files keep working across upgrades.
pub fn heal_config_file() -> io::Result<()> {
    let conf_file = super::Config::config_file();
    if !conf_file.exists() {
        return Ok(());
    }

    let content = fs::read_to_string(&conf_file)?;
    let mut yaml: Value = match serde_yaml::from_str(&content) {
        Ok(y) => y,
        // An unreadable file is reported at load time, not here.
        Err(_) => return Ok(()),
    };

    let Some(map) = yaml.as_mapping_mut() else {
        return Ok(());
    };

    let mut added: Vec<&str> = Vec::new();
    for (name, default) in ADDED_KEYS {
        let key = Value::String(name.to_string());
        if !map.contains_key(&key) {
            map.insert(key, default());
            added.push(name);
        }
    }

    if added.is_empty() {
        return Ok(());
    }

    let serialized = serde_yaml::to_string(&yaml)
        .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;
    fs::write(&conf_file, serialized)?;

    info(format!(
        "Config updated with new settings: {}",
        added.join(", ")
    ));
    Ok(())
}
