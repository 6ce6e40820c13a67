use std::fs::File;
use std::io::BufReader;
use std::result::Result as DefaultResult;

use serde_json::Value as JsnVal;

use super::AbstractConfidentiality;
use crate::error::{AppConfidentialityError, AppErrorCode};

// secrets kept in a plain JSON file owned by the running user, the path
// tree inside the file is addressed with slash-separated IDs
pub struct UserSpaceConfidentiality {
    fullpath: String,
}

impl UserSpaceConfidentiality {
    pub fn build(fullpath: String) -> Self {
        Self { fullpath }
    }

    fn load_root(&self) -> DefaultResult<JsnVal, AppConfidentialityError> {
        let f = File::open(self.fullpath.as_str()).map_err(|e| AppConfidentialityError {
            code: AppErrorCode::IOerror(e.kind()),
            detail: self.fullpath.clone(),
        })?;
        let rdr = BufReader::new(f);
        serde_json::from_reader::<_, JsnVal>(rdr).map_err(|e| AppConfidentialityError {
            code: AppErrorCode::InvalidJsonFormat,
            detail: e.to_string(),
        })
    }
}

impl AbstractConfidentiality for UserSpaceConfidentiality {
    fn try_get_payload(&self, id_: &str) -> DefaultResult<String, AppConfidentialityError> {
        let root = self.load_root()?;
        let mut pointer = String::from("/");
        pointer += id_.trim_matches('/');
        let node = root.pointer(pointer.as_str()).ok_or(AppConfidentialityError {
            code: AppErrorCode::MissingSecretPath,
            detail: id_.to_string(),
        })?;
        Ok(node.to_string())
    }
}
