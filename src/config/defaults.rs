//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "Strata".into()
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn email() -> String {
        "user@noreply.strata".into()
    }

    pub fn language() -> String {
        "en".into()
    }

    pub fn url() -> Option<String> {
        None
    }

    pub fn base_path() -> String {
        "/".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn entries() -> PathBuf {
        "entries".into()
    }

    pub fn templates() -> PathBuf {
        "templates".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }

    pub fn uploads() -> PathBuf {
        "uploads".into()
    }

    pub fn output() -> PathBuf {
        "site".into()
    }

    pub fn tag_archive_layout() -> String {
        "brief".into()
    }

    pub mod feed {
        pub fn rss_filename() -> String {
            "rss.xml".into()
        }

        pub fn atom_filename() -> String {
            "atom.xml".into()
        }
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        8080
    }

    pub fn autorefresh() -> u64 {
        4
    }
}

// ============================================================================
// [publish] Section Defaults
// ============================================================================

pub mod publish {
    pub fn rsync_command() -> String {
        "rsync".into()
    }

    pub fn rsync_flags() -> String {
        "avzPk".into()
    }
}
