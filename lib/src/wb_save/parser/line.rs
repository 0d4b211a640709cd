use super::error::StructuralError;

/// The implicit value of a key that appears alone, like `isNOfRiver`.
pub const FLAG_VALUE: &str = "1";

/// Splits a trimmed line into its key-value pairs.
///
/// A line may hold several assignments separated by commas, e.g.
/// `x=3,y=4`. Each part is either `key=value`, split on the first `=`, or a
/// single word with no `=` and no space, which is a presence-only flag with
/// the value [FLAG_VALUE]. Empty parts are skipped.
///
/// Pairs are returned in the order they appear, and a key repeated on the
/// same line yields one pair per occurrence.
pub fn tokenize_line(line: &str) -> Result<Vec<(&str, &str)>, StructuralError> {
    let mut pairs = Vec::new();
    for part in line.split(',') {
        let part = part.trim_matches(' ');
        if part.is_empty() {
            continue;
        }
        pairs.push(split_pair(part)?);
    }
    Ok(pairs)
}

fn split_pair(part: &str) -> Result<(&str, &str), StructuralError> {
    match part.split_once('=') {
        Some(pair) => Ok(pair),
        None if !part.contains(' ') => Ok((part, FLAG_VALUE)),
        None => Err(StructuralError::MalformedPair(part.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single() {
        assert_eq!(
            tokenize_line("Era=ERA_ANCIENT").unwrap(),
            vec![("Era", "ERA_ANCIENT")]
        );
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(
            tokenize_line("x=3, y=4").unwrap(),
            vec![("x", "3"), ("y", "4")]
        );
    }

    #[test]
    fn test_flag() {
        assert_eq!(tokenize_line("isNOfRiver").unwrap(), vec![("isNOfRiver", "1")]);
    }

    #[test]
    fn test_value_with_equals_and_spaces() {
        assert_eq!(
            tokenize_line("Description=a = b").unwrap(),
            vec![("Description", "a = b")]
        );
        assert_eq!(
            tokenize_line("grid width=10").unwrap(),
            vec![("grid width", "10")]
        );
    }

    #[test]
    fn test_repeated_key_kept() {
        assert_eq!(
            tokenize_line("FeatureType=A,FeatureType=B").unwrap(),
            vec![("FeatureType", "A"), ("FeatureType", "B")]
        );
    }

    #[test]
    fn test_empty_parts() {
        assert_eq!(tokenize_line("a=1,,b=2,").unwrap(), vec![("a", "1"), ("b", "2")]);
        assert!(tokenize_line(",").unwrap().is_empty());
    }

    #[test]
    fn test_malformed() {
        let err = tokenize_line("a=1,not a pair").unwrap_err();
        assert_eq!(err, StructuralError::MalformedPair("not a pair".to_string()));
    }
}
