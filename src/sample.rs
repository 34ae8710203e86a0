use crate::model::ShiftRecord;
use crate::scheduler::util::hm;

/// Planning d'exemple : boutique, temps partiels, expédition, guichets.
pub fn sample_roster() -> Vec<ShiftRecord> {
    [
        ("Kiosk 1", (8, 0), (18, 0), true),
        ("Kiosk 2", (8, 0), (18, 0), true),
        ("Part-time 1", (9, 0), (12, 0), false),
        ("Part-time 2", (14, 0), (18, 0), false),
        ("Part-time 3", (9, 0), (15, 0), false),
        ("Part-time 4", (10, 0), (15, 0), false),
        ("Shipping", (8, 0), (18, 0), true),
        ("Counter 1", (8, 0), (18, 0), true),
        ("Counter 2", (8, 0), (18, 0), true),
    ]
    .into_iter()
    .map(|(name, (sh, sm), (eh, em), required)| {
        ShiftRecord::new(name, hm(sh, sm), hm(eh, em), required)
    })
    .collect()
}
