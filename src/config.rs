/// Thresholds steering the classifier.
///
/// Values are accepted verbatim: negative or >100 thresholds are legal
/// user input and simply shift which archetypes are reachable. `min_hands`
/// of 0 is also accepted; the classifier guards the empty session itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyConfig {
    pub vpip_threshold: i32,
    pub tight_diff_threshold: i32,
    pub loose_diff_threshold: i32,
    pub min_hands: u32,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            vpip_threshold: 20,
            tight_diff_threshold: 5,
            loose_diff_threshold: 8,
            min_hands: 10,
        }
    }
}

/// Partial update; fields left as `None` keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigPatch {
    pub vpip_threshold: Option<i32>,
    pub tight_diff_threshold: Option<i32>,
    pub loose_diff_threshold: Option<i32>,
    pub min_hands: Option<u32>,
}

impl ClassifyConfig {
    pub fn apply(&mut self, patch: ConfigPatch) {
        if let Some(v) = patch.vpip_threshold {
            self.vpip_threshold = v;
        }
        if let Some(v) = patch.tight_diff_threshold {
            self.tight_diff_threshold = v;
        }
        if let Some(v) = patch.loose_diff_threshold {
            self.loose_diff_threshold = v;
        }
        if let Some(v) = patch.min_hands {
            self.min_hands = v;
        }
    }
}
