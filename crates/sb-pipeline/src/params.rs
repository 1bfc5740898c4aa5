//! Trailing argument formatting.

/// Render literal parameters as the trailing part of an argument list.
///
/// Each parameter becomes `", " + param`, in order and untouched: no
/// trimming, quoting, or escaping. An empty list renders as an empty string.
///
/// ```
/// use sb_pipeline::format_parameters;
///
/// assert_eq!(format_parameters(&[]), "");
/// assert_eq!(format_parameters(&["a".into(), "b".into()]), ", a, b");
/// ```
pub fn format_parameters(params: &[String]) -> String {
    params.iter().fold(String::new(), |mut out, param| {
        out.push_str(", ");
        out.push_str(param);
        out
    })
}
