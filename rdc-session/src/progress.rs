//! Completeness evaluator
//!
//! Pure function of the current slots and form state; safe to recompute on
//! every change. A detail field joins the required set while its flag field
//! is "yes", so readiness matches what the intake schema will accept.

use crate::{MetadataForm, SlotTracker};
use rdc_common::participant::{CONDITIONAL_FIELDS, REQUIRED_FIELDS};
use rdc_common::ImageSlot;

/// Snapshot of how close the session is to submit-ready
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionState {
    pub filled_slots: usize,
    pub total_slots: usize,
    pub filled_fields: usize,
    pub total_fields: usize,
    /// True iff both counts equal their totals
    pub submit_ready: bool,
}

/// Compute per-category and overall completion
pub fn evaluate(slots: &SlotTracker, form: &MetadataForm) -> CompletionState {
    let total_slots = ImageSlot::ALL.len();
    let filled_slots = slots.filled_count();

    let mut total_fields = 0;
    let mut filled_fields = 0;
    for field in required_fields(form) {
        total_fields += 1;
        if form.is_filled(field) {
            filled_fields += 1;
        }
    }

    CompletionState {
        filled_slots,
        total_slots,
        filled_fields,
        total_fields,
        submit_ready: filled_slots == total_slots && filled_fields == total_fields,
    }
}

/// The fields currently required: the fixed set plus any detail field
/// whose flag is "yes"
fn required_fields(form: &MetadataForm) -> impl Iterator<Item = &'static str> + '_ {
    REQUIRED_FIELDS.into_iter().chain(
        CONDITIONAL_FIELDS
            .into_iter()
            .filter(|(flag, _)| form.get(flag).map(str::trim) == Some("yes"))
            .map(|(_, detail)| detail),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SlotFile;

    fn filled_form() -> MetadataForm {
        let mut form = MetadataForm::new();
        for (field, value) in [
            ("name", "Ana"),
            ("age", "28"),
            ("gender", "female"),
            ("city", "Lisbon"),
            ("country", "Portugal"),
            ("hairType", "wavy"),
            ("hairLength", "medium"),
            ("hairDensity", "high"),
            ("hairCondition", "healthy"),
            ("scalpType", "normal"),
            ("recentTreatments", "no"),
            ("scalpConditions", "no"),
        ] {
            form.set(field, value);
        }
        form
    }

    fn filled_slots() -> SlotTracker {
        let mut tracker = SlotTracker::new();
        for slot in ImageSlot::ALL {
            tracker.set(
                slot,
                Some(SlotFile {
                    filename: format!("{slot}.png"),
                    content_type: "image/png".to_string(),
                    bytes: vec![0u8; 4],
                }),
            );
        }
        tracker
    }

    #[test]
    fn ready_iff_everything_is_filled() {
        let state = evaluate(&filled_slots(), &filled_form());
        assert_eq!(state.filled_slots, 5);
        assert_eq!(state.filled_fields, 12);
        assert!(state.submit_ready);
    }

    #[test]
    fn missing_slot_blocks_readiness() {
        let mut slots = filled_slots();
        slots.clear(ImageSlot::Hair2);
        let state = evaluate(&slots, &filled_form());
        assert_eq!(state.filled_slots, 4);
        assert!(!state.submit_ready);
    }

    #[test]
    fn whitespace_field_blocks_readiness() {
        let mut form = filled_form();
        form.set("country", "  ");
        let state = evaluate(&filled_slots(), &form);
        assert_eq!(state.filled_fields, 11);
        assert!(!state.submit_ready);
    }

    #[test]
    fn yes_flag_pulls_detail_field_into_the_required_set() {
        let mut form = filled_form();
        form.set("recentTreatments", "yes");

        let state = evaluate(&filled_slots(), &form);
        assert_eq!(state.total_fields, 13);
        assert!(!state.submit_ready);

        form.set("treatmentDetails", "keratin, May 2026");
        let state = evaluate(&filled_slots(), &form);
        assert_eq!(state.filled_fields, 13);
        assert!(state.submit_ready);
    }

    #[test]
    fn no_flag_leaves_detail_field_out() {
        let mut form = filled_form();
        form.set("treatmentDetails", "stale detail text");
        let state = evaluate(&filled_slots(), &form);
        assert_eq!(state.total_fields, 12);
        assert!(state.submit_ready);
    }

    #[test]
    fn empty_session_is_not_ready() {
        let state = evaluate(&SlotTracker::new(), &MetadataForm::new());
        assert_eq!(state.filled_slots, 0);
        assert_eq!(state.filled_fields, 0);
        assert!(!state.submit_ready);
    }
}
