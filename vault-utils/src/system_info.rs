use sysinfo::System;

pub fn get_os_info() -> String {
    System::name().unwrap_or("Unknown OS".to_string())
}
