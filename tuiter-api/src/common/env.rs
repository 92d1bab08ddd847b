use std::env;

pub fn env_int(name: &str) -> Option<usize> {
    match env::var(name) {
        Ok(str) => match str.parse::<usize>() {
            Ok(int) => Some(int),
            _ => None,
        },
        _ => None,
    }
}

pub fn env_str(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(str) if !str.is_empty() => Some(str),
        _ => None,
    }
}

pub fn env_bool(name: &str) -> Option<bool> {
    match env::var(name) {
        Ok(str) if str == "true" || str == "1" => Some(true),
        Ok(str) if str == "false" || str == "0" => Some(false),
        _ => None,
    }
}
