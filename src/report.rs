//! Console output of creation results.

use crate::creator::CreationResult;

/// Line printed for a created file or folder, e.g. `File created at /tmp/out/a.txt`.
pub fn format_result(result: &CreationResult) -> String {
    format!("{} created at {}", result.kind, result.destination_path.display())
}

/// Prints one line per result, in creation order.
pub fn print_results(results: &[CreationResult]) {
    for result in results {
        println!("{}", format_result(result));
    }
}
