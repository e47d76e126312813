use std::path::PathBuf;

use crate::flags::Flags;

pub const RC_FILE_NAME: &str = ".myshellrc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// Startup file to read, if any.
    pub rc_path: Option<PathBuf>,
    /// Set when the path came from `--config`; a missing file is then an error.
    pub explicit: bool,
}

impl ConfigPaths {
    pub fn new(flags: &Flags) -> Self {
        if flags.is_set("norc") {
            return Self {
                rc_path: None,
                explicit: false,
            };
        }
        match flags.get_value("config") {
            Some(path) => Self {
                rc_path: Some(PathBuf::from(path)),
                explicit: true,
            },
            None => Self::from_home(dirs::home_dir()),
        }
    }

    pub fn from_home(home: Option<PathBuf>) -> Self {
        Self {
            rc_path: home.map(|home| home.join(RC_FILE_NAME)),
            explicit: false,
        }
    }
}
