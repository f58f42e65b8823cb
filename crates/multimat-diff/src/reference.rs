//! Reference member selection for delta diffs

use multimat_property::MemberId;

/// Pick the member a delta diff compares the control against
///
/// The first slot in group order that is non-empty, not the control and not
/// excluded. `None` means no diff can be computed and propagation is a no-op.
///
/// When several candidates differ from the control in different ways, the first
/// one wins; there is no further tie-break.
#[must_use]
pub fn select_reference(
    slots: &[Option<MemberId>],
    control: MemberId,
    is_excluded: impl Fn(MemberId) -> bool,
) -> Option<MemberId> {
    slots
        .iter()
        .flatten()
        .copied()
        .find(|member| *member != control && !is_excluded(*member))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_non_control_member_wins() {
        let (a, b, c) = (MemberId::new(), MemberId::new(), MemberId::new());
        let slots = [Some(a), None, Some(b), Some(c)];
        assert_eq!(select_reference(&slots, a, |_| false), Some(b));
        assert_eq!(select_reference(&slots, b, |_| false), Some(a));
    }

    #[test]
    fn excluded_members_are_skipped() {
        let (sentinel, a, b) = (MemberId::new(), MemberId::new(), MemberId::new());
        let slots = [Some(sentinel), Some(a), Some(b)];
        assert_eq!(select_reference(&slots, a, |m| m == sentinel), Some(b));
    }

    #[test]
    fn no_candidate_yields_none() {
        let a = MemberId::new();
        assert_eq!(select_reference(&[Some(a), None, Some(a)], a, |_| false), None);
        assert_eq!(select_reference(&[], a, |_| false), None);
    }
}
