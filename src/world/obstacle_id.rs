//! A Module with some utilities for working with ObstacleIds

use std::hash::{BuildHasherDefault, Hasher};

/// The Type used to reference an Obstacle in a world snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleId(pub u32);

impl std::fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A specialized [`HashSet`](hashbrown::HashSet) for ObstacleIds with a faster Hasher
///
/// Used to tell the Graph builder which Obstacles it may ignore, e.g. the object that is the
/// goal of the Path.
pub type ObstacleIdSet = hashbrown::HashSet<ObstacleId, BuildHasherDefault<ObstacleIdHasher>>;

/// A [`Hasher`](Hasher) specialized on ObstacleIds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ObstacleIdHasher(u64);

impl Hasher for ObstacleIdHasher {
    /// panics, since only ObstacleIds are supposed to be used
    fn write(&mut self, _: &[u8]) {
        unreachable!("This Hasher only works with ObstacleIds")
    }
    /// Writes the number of a single ObstacleId into this hasher.
    fn write_u32(&mut self, id: u32) {
        self.0 = id as u64
    }
    fn finish(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_lookup() {
        let set: ObstacleIdSet = [ObstacleId(3), ObstacleId(7)].into_iter().collect();

        assert!(set.contains(&ObstacleId(3)));
        assert!(set.contains(&ObstacleId(7)));
        assert!(!set.contains(&ObstacleId(4)));
    }

    #[test]
    fn display() {
        assert_eq!(ObstacleId(12).to_string(), "#12");
    }
}
