use super::{InputError, MAX_ARGS};

/// Whitespace-separated words of one input line, borrowed from the line.
///
/// Holds at most `MAX_ARGS - 1` words; the last slot is reserved for the
/// end-of-arguments sentinel that the launcher appends when building `argv`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgVector<'a> {
    args: Vec<&'a str>,
}

impl<'a> ArgVector<'a> {
    pub fn tokenize(line: &'a str) -> Result<Self, InputError> {
        let mut args = Vec::new();
        for word in line.split_whitespace() {
            if args.len() == MAX_ARGS - 1 {
                return Err(InputError::TooManyArguments { limit: MAX_ARGS - 1 });
            }
            args.push(word);
        }
        Ok(Self { args })
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn command(&self) -> Option<&'a str> {
        self.args.first().copied()
    }

    pub fn last(&self) -> Option<&'a str> {
        self.args.last().copied()
    }

    /// Drops the final word. Used to strip a trailing background marker.
    pub fn pop(&mut self) -> Option<&'a str> {
        self.args.pop()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.args
    }
}
