//! Line-based prompts on stderr/stdin

use std::io::{self, BufRead, Write};

/// Print `question` and read one trimmed line
pub fn ask(question: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{question} ")?;
    stderr.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

pub fn confirm(question: &str) -> io::Result<bool> {
    let answer = ask(&format!("{question} [y/N]"))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

/// Show a numbered list and return the picked index
///
/// # Errors
/// Fails on an empty list, since nothing could ever be picked.
pub fn choose<T>(title: &str, items: &[T], label: impl Fn(&T) -> &str) -> io::Result<usize> {
    if items.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has nothing to choose from", title.trim()),
        ));
    }
    eprintln!("{title}");
    for (i, item) in items.iter().enumerate() {
        eprintln!("  {:>3}. {}", i + 1, label(item));
    }
    loop {
        let answer = ask(&format!("Choose 1-{}:", items.len()))?;
        match parse_choice(&answer, items.len()) {
            Some(index) => return Ok(index),
            None => eprintln!("Please enter a number between 1 and {}", items.len()),
        }
    }
}

/// 1-based answer to 0-based index
fn parse_choice(answer: &str, len: usize) -> Option<usize> {
    answer
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice("3", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("two", 3), None);
        assert_eq!(parse_choice("1", 0), None);
    }

    #[test]
    fn test_choose_from_nothing_fails_without_reading() {
        let err = choose("Ward", &[] as &[String], |s| s.as_str()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
