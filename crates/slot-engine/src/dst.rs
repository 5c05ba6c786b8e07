//! DST transition policies for wall-clock window boundaries.

use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// How far before a nonexistent local time to look for the offset in force
/// ahead of the gap. Ordinary gaps are an hour or two; the longer probe covers
/// whole skipped days such as Samoa's jump across the date line in 2011.
const GAP_PROBE_HOURS: [i64; 2] = [3, 26];

/// Policy for window boundaries that fall in a DST gap (e.g. 02:30 on the
/// night clocks spring forward). Ambiguous times in the fall-back overlap
/// always resolve to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Move the boundary forward by the length of the gap (02:30 → 03:30).
    #[default]
    ShiftForward,
    /// Drop any window with a boundary inside the gap.
    Skip,
}

/// Convert a wall-clock value in `tz` to an absolute instant.
///
/// Returns `None` when the local time falls in a gap and the policy is
/// [`DstPolicy::Skip`], or when the shifted instant is outside chrono's
/// representable range.
pub fn resolve_local(tz: &Tz, local: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Utc>> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return Some(dt.with_timezone(&Utc));
    }
    match policy {
        DstPolicy::Skip => None,
        DstPolicy::ShiftForward => {
            let before_gap = GAP_PROBE_HOURS.iter().find_map(|&hours| {
                let probe = local.checked_sub_signed(Duration::hours(hours))?;
                tz.from_local_datetime(&probe).earliest()
            })?;
            let offset = before_gap.offset().fix().local_minus_utc();
            let utc = local.checked_sub_signed(Duration::seconds(i64::from(offset)))?;
            Some(Utc.from_utc_datetime(&utc))
        }
    }
}

