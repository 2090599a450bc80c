use crate::config::EnvConfig;

/// Fixed-length binary mask over the discrete action space.
///
/// The catalog is ordered, so the legal indices are always a prefix of
/// `[0, MAX_ACTIONS)`: the first `min(n, MAX_ACTIONS)` entries are set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActionMask {
    available: usize,
}

impl ActionMask {
    /// Number of entries in every mask.
    pub const LEN: usize = EnvConfig::MAX_ACTIONS;

    /// Builds the mask for a catalog holding `len` actions.
    pub fn from_catalog_len(len: usize) -> Self {
        Self {
            available: len.min(Self::LEN),
        }
    }

    /// Mask with no legal entries.
    pub const fn empty() -> Self {
        Self { available: 0 }
    }

    /// Number of set entries, `min(catalog_len, MAX_ACTIONS)`.
    pub const fn available_count(&self) -> usize {
        self.available
    }

    pub const fn is_empty(&self) -> bool {
        self.available == 0
    }

    /// Returns true if `index` addresses a legal action.
    pub const fn is_set(&self, index: usize) -> bool {
        index < self.available
    }

    /// Iterates the mask as `0`/`1` entries.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..Self::LEN).map(|index| u8::from(self.is_set(index)))
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.iter().collect()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ActionMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(Self::LEN))?;
        for bit in self.iter() {
            seq.serialize_element(&bit)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ActionMask {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = Vec::<u8>::deserialize(deserializer)?;
        if bits.len() != Self::LEN {
            return Err(serde::de::Error::invalid_length(
                bits.len(),
                &"an action mask of MAX_ACTIONS entries",
            ));
        }
        let available = bits.iter().take_while(|&&bit| bit == 1).count();
        if bits[available..].iter().any(|&bit| bit != 0) {
            return Err(serde::de::Error::custom(
                "action mask entries must be a prefix of ones followed by zeros",
            ));
        }
        Ok(Self { available })
    }
}
