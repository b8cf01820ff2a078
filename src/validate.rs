use thiserror::Error;

/// Characters that cannot appear in a folder name on the target filesystem
pub const FORBIDDEN_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NameError {
    #[error("Folder name must not be empty")]
    Empty,
    #[error("Folder name '{name}' must not contain the forbidden character '{ch}'")]
    Forbidden { name: String, ch: char },
}

/// Check a candidate folder name against the reserved character set
pub fn validate_folder_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }

    // RUST LEARNING: `find()` stops at the first matching char and returns Option<char>
    if let Some(ch) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(NameError::Forbidden {
            name: name.to_string(),
            ch,
        });
    }

    Ok(())
}

pub fn is_valid_folder_name(name: &str) -> bool {
    validate_folder_name(name).is_ok()
}

/// Whether two names address the same folder. NTFS ignores case, so Windows compares case-insensitively.
pub fn same_folder_name(a: &str, b: &str) -> bool {
    if cfg!(windows) {
        a.to_lowercase() == b.to_lowercase()
    } else {
        a == b
    }
}
