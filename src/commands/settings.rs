use crate::db::Database;
use std::collections::HashMap;
use tauri::State;

const SETTING_KEYS: &[&str] = &["server_url"];

#[tauri::command]
pub fn get_settings(db: State<'_, Database>) -> Result<HashMap<String, String>, String> {
    let mut map = HashMap::new();
    for key in SETTING_KEYS {
        if let Some(value) = db.get_setting(key).map_err(|e| e.to_string())? {
            map.insert(key.to_string(), value);
        }
    }
    Ok(map)
}

#[tauri::command]
pub fn set_setting(db: State<'_, Database>, key: String, value: String) -> Result<(), String> {
    if !SETTING_KEYS.contains(&key.as_str()) {
        return Err(format!("Unknown setting key: {}", key));
    }
    db.set_setting(&key, &value).map_err(|e| e.to_string())
}
