//! Static determinacy check performed before any factorisation.

use crate::errors::AnalysisError;
use crate::solver::SolverOptions;

/// Confirm that the system is square and within the configured size limit.
///
/// # Errors
///
/// Returns [`AnalysisError::NotStaticallyDeterminate`] when `rows != columns`
/// and [`AnalysisError::SystemTooLarge`] when the unknown count exceeds
/// [`SolverOptions::max_unknowns`].
///
/// # Examples
/// ```
/// use trussforce::{check_determinacy, AnalysisError, SolverOptions};
///
/// let options = SolverOptions::default();
/// assert!(check_determinacy(6, 6, &options).is_ok());
/// assert_eq!(
///     check_determinacy(6, 7, &options),
///     Err(AnalysisError::NotStaticallyDeterminate { rows: 6, columns: 7 })
/// );
/// ```
pub fn check_determinacy(
    rows: usize,
    columns: usize,
    options: &SolverOptions,
) -> Result<(), AnalysisError> {
    if rows != columns {
        return Err(AnalysisError::NotStaticallyDeterminate { rows, columns });
    }
    if columns > options.max_unknowns {
        return Err(AnalysisError::SystemTooLarge {
            unknowns: columns,
            limit: options.max_unknowns,
        });
    }
    Ok(())
}
