//! Activity registry.
//!
//! The launcher ships with a fixed list of scripts. Paths are stored
//! relative to the scripts directory and resolved once at startup.

use std::path::{Path, PathBuf};

/// A launchable script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub path: PathBuf,
}

impl Activity {
    pub fn new(name: &str, description: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            path: path.into(),
        }
    }
}

/// (name, description, path relative to the scripts directory)
const BUILTIN: &[(&str, &str, &str)] = &[
    (
        "Gather Training Data",
        "Source for training",
        "unique_face_base_emotional/gather_data.py",
    ),
    (
        "Extract Embeddings",
        "Get properties of face",
        "unique_face_base_emotional/Extract_embeddings.py",
    ),
    (
        "Train Model",
        "Quick training of script (generating model)",
        "unique_face_base_emotional/Train_model.py",
    ),
    (
        "Face Recognition",
        "Real time face & emotion",
        "unique_face_base_emotional/Face_Recognizer_Emotion.py",
    ),
];

/// Ordered, read-only list of activities.
#[derive(Debug, Clone)]
pub struct Registry {
    activities: Vec<Activity>,
}

impl Registry {
    /// The compiled-in activities, with paths joined onto `scripts_dir`.
    pub fn builtin(scripts_dir: &Path) -> Self {
        let activities = BUILTIN
            .iter()
            .map(|(name, description, rel)| Activity::new(name, description, scripts_dir.join(rel)))
            .collect();
        Self { activities }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Look up an activity by 1-based index or case-insensitive name.
    pub fn find(&self, query: &str) -> Option<&Activity> {
        let query = query.trim();
        if let Ok(n) = query.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| self.get(i));
        }
        self.activities
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(query))
    }
}
