//! Prefix-based include/exclude filtering for project and package names

/// Include and exclude prefix lists tested against candidate names with a
/// case-insensitive starts-with match. Empty lists mean "no restriction".
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl FilterSpec {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    /// Filter that passes every name.
    pub fn pass_all() -> Self {
        Self::default()
    }

    /// Whether `name` passes this filter.
    ///
    /// The include gate passes when the include list is empty or some include
    /// prefix matches; a failed include gate short-circuits to `false`. Any
    /// exclude prefix match then rejects the name.
    pub fn includes(&self, name: &str) -> bool {
        let included = self.include.is_empty()
            || self.include.iter().any(|p| starts_with_ignore_case(name, p));
        if !included {
            return false;
        }

        let excluded = self.exclude.iter().any(|p| starts_with_ignore_case(name, p));
        !excluded
    }
}

/// ASCII case-insensitive starts-with, matching NuGet's ordinal-ignore-case
/// comparison of package identifiers.
fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    name.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(include: &[&str], exclude: &[&str]) -> FilterSpec {
        FilterSpec::new(
            include.iter().map(|s| s.to_string()).collect(),
            exclude.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let filter = FilterSpec::pass_all();
        assert!(filter.includes("Newtonsoft.Json"));
        assert!(filter.includes(""));
    }

    #[test]
    fn test_include_prefix_gates_names() {
        let filter = spec(&["Microsoft."], &[]);
        assert!(filter.includes("Microsoft.Extensions.Logging"));
        assert!(!filter.includes("Newtonsoft.Json"));
    }

    #[test]
    fn test_exclude_prefix_rejects_names() {
        let filter = spec(&[], &["System.", "Microsoft."]);
        assert!(!filter.includes("System.Text.Json"));
        assert!(!filter.includes("Microsoft.CSharp"));
        assert!(filter.includes("Serilog"));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let filter = spec(&["Microsoft."], &["Microsoft.AspNetCore."]);
        assert!(filter.includes("Microsoft.Extensions.Hosting"));
        assert!(!filter.includes("Microsoft.AspNetCore.Mvc"));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let filter = spec(&["microsoft."], &["MICROSOFT.ASPNETCORE."]);
        assert!(filter.includes("Microsoft.Extensions.Hosting"));
        assert!(!filter.includes("microsoft.aspnetcore.mvc"));
    }

    #[test]
    fn test_prefix_longer_than_name_does_not_match() {
        let filter = spec(&["Serilog.Sinks."], &[]);
        assert!(!filter.includes("Serilog"));
    }

    #[test]
    fn test_non_ascii_boundary_does_not_panic() {
        let filter = spec(&["Pa"], &[]);
        assert!(!filter.includes("Päckage"));
    }
}
