use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prefs {
    pub rtl: bool,
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_data_dir() -> PathBuf {
    home_dir().join(".glowdesk")
}

fn selection_path(dir: &Path) -> PathBuf {
    dir.join("selection.json")
}

fn prefs_path(dir: &Path) -> PathBuf {
    dir.join("prefs.json")
}

fn write_atomic(dir: &Path, final_path: &Path, tmp_name: &str, bytes: Vec<u8>) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let tmp_path = dir.join(tmp_name);
    fs::write(&tmp_path, bytes)?;
    match fs::rename(&tmp_path, final_path) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if final_path.exists() {
                fs::remove_file(final_path)?;
                fs::rename(&tmp_path, final_path)?;
                Ok(())
            } else {
                Err(rename_err)
            }
        }
    }
}

pub fn save_selection(dir: &Path, products: &[Product]) -> io::Result<()> {
    let bytes = serde_json::to_vec_pretty(products)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
    write_atomic(dir, &selection_path(dir), "selection.json.tmp", bytes)
}

/// Restores the persisted selection. A missing file is an empty selection; a
/// corrupt file degrades to empty with a warning rather than failing startup.
pub fn load_selection(dir: &Path) -> (Vec<Product>, Option<String>) {
    let path = selection_path(dir);
    if !path.exists() {
        return (Vec::new(), None);
    }

    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(err) => {
            return (
                Vec::new(),
                Some(format!("failed to read {}: {err}", path.display())),
            );
        }
    };

    match serde_json::from_slice(&data) {
        Ok(products) => (products, None),
        Err(err) => (
            Vec::new(),
            Some(format!("failed to parse {}: {err}", path.display())),
        ),
    }
}

pub fn save_prefs(dir: &Path, prefs: &Prefs) -> io::Result<()> {
    let bytes = serde_json::to_vec_pretty(prefs)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;
    write_atomic(dir, &prefs_path(dir), "prefs.json.tmp", bytes)
}

pub fn load_prefs(dir: &Path) -> (Prefs, Option<String>) {
    let path = prefs_path(dir);
    if !path.exists() {
        return (Prefs::default(), None);
    }

    let data = match fs::read(&path) {
        Ok(data) => data,
        Err(err) => {
            return (
                Prefs::default(),
                Some(format!("failed to read {}: {err}", path.display())),
            );
        }
    };

    match serde_json::from_slice(&data) {
        Ok(prefs) => (prefs, None),
        Err(err) => (
            Prefs::default(),
            Some(format!("failed to parse {}: {err}", path.display())),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{load_prefs, load_selection, save_prefs, save_selection, Prefs};
    use crate::catalog::Product;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "glowdesk_store_{prefix}_{}_{}",
            std::process::id(),
            nanos
        ))
    }

    fn product(id: u32) -> Product {
        Product {
            id,
            name: format!("Product {id}"),
            brand: "CeraVe".to_string(),
            category: "skincare".to_string(),
            image: format!("img/{id}.png"),
            description: Some("A gentle formula.".to_string()),
        }
    }

    #[test]
    fn selection_round_trips_through_disk() {
        let dir = temp_dir("roundtrip");
        let selection = vec![product(1), product(2)];

        save_selection(&dir, &selection).expect("selection should save");
        let (restored, warning) = load_selection(&dir);
        assert!(warning.is_none());
        assert_eq!(restored, selection);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_selection_is_empty_without_warning() {
        let dir = temp_dir("missing");
        let (restored, warning) = load_selection(&dir);
        assert!(restored.is_empty());
        assert!(warning.is_none());
    }

    #[test]
    fn corrupt_selection_degrades_to_empty_with_warning() {
        let dir = temp_dir("corrupt");
        fs::create_dir_all(&dir).expect("temp dir should create");
        fs::write(dir.join("selection.json"), "not json at all")
            .expect("corrupt fixture should write");

        let (restored, warning) = load_selection(&dir);
        assert!(restored.is_empty());
        assert!(warning.expect("corrupt file should warn").contains("failed to parse"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn prefs_round_trip_preserves_rtl_flag() {
        let dir = temp_dir("prefs");

        save_prefs(&dir, &Prefs { rtl: true }).expect("prefs should save");
        let (prefs, warning) = load_prefs(&dir);
        assert!(warning.is_none());
        assert!(prefs.rtl);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupt_prefs_degrade_to_default() {
        let dir = temp_dir("prefs_corrupt");
        fs::create_dir_all(&dir).expect("temp dir should create");
        fs::write(dir.join("prefs.json"), "{\"rtl\": \"sideways\"}")
            .expect("corrupt fixture should write");

        let (prefs, warning) = load_prefs(&dir);
        assert!(!prefs.rtl);
        assert!(warning.is_some());

        let _ = fs::remove_dir_all(dir);
    }
}
