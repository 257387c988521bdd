/// Ordered set of satellite names picked on the pass search form.
///
/// Insertion order is display order; duplicates are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedSatelliteSet {
    names: Vec<String>,
}

impl SelectedSatelliteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the name was already selected (or is blank).
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.trim().is_empty() || self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn remove(&mut self, name: &str) -> bool {
        match self.names.iter().position(|n| n == name) {
            Some(pos) => {
                self.names.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Comma-joined form used by the `satellites` query parameter.
    pub fn joined(&self) -> String {
        self.names.join(",")
    }

    pub fn from_joined(raw: &str) -> Self {
        let mut set = Self::new();
        for name in raw.split(',') {
            set.insert(name.trim());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order_and_rejects_duplicates() {
        let mut set = SelectedSatelliteSet::new();
        assert!(set.insert("NOAA 19"));
        assert!(set.insert("ISS (ZARYA)"));
        assert!(!set.insert("NOAA 19"));
        assert!(!set.insert("  "));

        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["NOAA 19", "ISS (ZARYA)"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut set = SelectedSatelliteSet::from_joined("A,B,C");
        assert!(set.remove("B"));
        assert!(!set.remove("B"));
        assert_eq!(set.joined(), "A,C");
    }

    #[test]
    fn joined_round_trips_through_query_form() {
        let set = SelectedSatelliteSet::from_joined("METEOR-M2 3, NOAA 18,,NOAA 18");
        assert_eq!(set.joined(), "METEOR-M2 3,NOAA 18");
        assert!(SelectedSatelliteSet::from_joined("").is_empty());
    }
}
