use crate::domain::UnitStatus;

/// Infer availability from the free-text details column. First match wins:
/// "sold out", then "launching", then "future".
pub fn infer_status(details: &str) -> UnitStatus {
    let details = details.to_lowercase();
    if details.contains("sold out") {
        UnitStatus::SoldOut
    } else if details.contains("launching") {
        UnitStatus::LaunchingSoon
    } else if details.contains("future") {
        UnitStatus::FuturePhase
    } else {
        UnitStatus::Available
    }
}
