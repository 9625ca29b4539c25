/// Password every fixture user is created with, so login flows can be
/// exercised end to end.
pub const TEST_PASSWORD: &str = "correct horse battery staple";
