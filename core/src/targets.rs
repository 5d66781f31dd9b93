//! Route files patched when no explicit list is given.

use std::path::PathBuf;

/// Route files, relative to the project root, that receive the prisma guard.
pub const DEFAULT_ROUTE_FILES: [&str; 11] = [
    "app/api/admin-test/route.ts",
    "app/api/auth/logout/route.ts",
    "app/api/auth/mfa/setup/route.ts",
    "app/api/buyers/[id]/route.ts",
    "app/api/buyers/route.ts",
    "app/api/dashboard/summary/route.ts",
    "app/api/employees/[id]/route.ts",
    "app/api/kas-besar/route.ts",
    "app/api/kas-besar/stats/route.ts",
    "app/api/payroll/route.ts",
    "app/api/payroll/save/route.ts",
];

/// File names treated as route files when discovering targets in a directory.
pub const ROUTE_FILE_NAMES: [&str; 2] = ["route.ts", "route.js"];

/// [`DEFAULT_ROUTE_FILES`] as owned paths.
pub fn default_route_files() -> Vec<PathBuf> {
    DEFAULT_ROUTE_FILES.into_iter().map(PathBuf::from).collect()
}
