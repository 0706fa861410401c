use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "eventdesk_access_token";
const REFRESH_TOKEN_KEY: &str = "eventdesk_refresh_token";
const CURRENT_ORG_KEY: &str = "eventdesk_current_org";
const CURRENT_EVENT_KEY: &str = "eventdesk_current_event";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn save(key: &str, value: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(key, value);
    }
}

fn load(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}

fn remove(key: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn save_access_token(token: &str) {
    save(ACCESS_TOKEN_KEY, token);
}

pub fn get_access_token() -> Option<String> {
    load(ACCESS_TOKEN_KEY)
}

pub fn save_refresh_token(token: &str) {
    save(REFRESH_TOKEN_KEY, token);
}

pub fn get_refresh_token() -> Option<String> {
    load(REFRESH_TOKEN_KEY)
}

/// Clear tokens and the remembered selection
pub fn clear_tokens() {
    remove(ACCESS_TOKEN_KEY);
    remove(REFRESH_TOKEN_KEY);
    remove(CURRENT_ORG_KEY);
    remove(CURRENT_EVENT_KEY);
}

/// Remember the organization/event picked in the header between sessions
pub fn save_selection(org_id: Option<&str>, event_id: Option<&str>) {
    match org_id {
        Some(id) => save(CURRENT_ORG_KEY, id),
        None => remove(CURRENT_ORG_KEY),
    }
    match event_id {
        Some(id) => save(CURRENT_EVENT_KEY, id),
        None => remove(CURRENT_EVENT_KEY),
    }
}

pub fn get_selection() -> (Option<String>, Option<String>) {
    (load(CURRENT_ORG_KEY), load(CURRENT_EVENT_KEY))
}
