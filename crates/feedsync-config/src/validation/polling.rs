//! Polling timing validation.

use crate::schema::FeedsyncConfig;

use super::helpers::{validate_range_f64, validate_range_u64};

pub(crate) fn validate_polling(errors: &mut Vec<String>, config: &FeedsyncConfig) {
    let polling = &config.polling;

    validate_range_u64(
        errors,
        "polling.min_delay_ms",
        polling.min_delay_ms,
        100,
        60_000,
    );
    validate_range_u64(
        errors,
        "polling.max_delay_ms",
        polling.max_delay_ms,
        100,
        600_000,
    );
    if polling.max_delay_ms < polling.min_delay_ms {
        errors.push(format!(
            "polling.max_delay_ms = {} must not be below polling.min_delay_ms = {}",
            polling.max_delay_ms, polling.min_delay_ms
        ));
    }
    validate_range_u64(
        errors,
        "polling.idle_timeout_ms",
        polling.idle_timeout_ms,
        1_000,
        3_600_000,
    );
    validate_range_f64(
        errors,
        "polling.empty_growth",
        polling.empty_growth,
        1.0,
        10.0,
    );
    validate_range_f64(
        errors,
        "polling.failure_growth",
        polling.failure_growth,
        1.0,
        10.0,
    );
}
