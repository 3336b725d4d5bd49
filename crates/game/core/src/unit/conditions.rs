use bitflags::bitflags;

bitflags! {
    /// Crowd-control categories, used both for what a debuff inflicts and for
    /// what a unit is immune to or currently suffering from.
    ///
    /// "Any-of" queries use [`CcKinds::intersects`], "all-of" queries use
    /// [`CcKinds::contains`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CcKinds: u16 {
        const STUN      = 1 << 0;
        const SLEEP     = 1 << 1;
        const PARALYSIS = 1 << 2;
        const FEAR      = 1 << 3;
        const CHARM     = 1 << 4;
        const BLIND     = 1 << 5;
        const ENTANGLE  = 1 << 6;
        const SLOW      = 1 << 7;
        const DAZE      = 1 << 8;
        const CONFUSION = 1 << 9;
        const NAUSEA    = 1 << 10;

        /// Effects that remove the victim from the fight entirely.
        const HARD = Self::STUN.bits()
            | Self::SLEEP.bits()
            | Self::PARALYSIS.bits()
            | Self::DAZE.bits();
        /// Mind-affecting effects, commonly resisted as a group.
        const MIND = Self::FEAR.bits()
            | Self::CHARM.bits()
            | Self::CONFUSION.bits()
            | Self::SLEEP.bits()
            | Self::DAZE.bits();
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for CcKinds {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CcKinds {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bitflags::serde::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_of_and_all_of_queries() {
        let immune = CcKinds::MIND;
        assert!(immune.intersects(CcKinds::FEAR | CcKinds::STUN));
        assert!(!immune.contains(CcKinds::FEAR | CcKinds::STUN));
        assert!(immune.contains(CcKinds::CHARM));
        assert!(!CcKinds::empty().intersects(CcKinds::all()));
    }
}
