//! Block comment removal for motion-log lines

/// Strips `/* ... */` comments line by line, remembering an unterminated
/// comment across lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommentStripper {
    in_comment: bool,
}

impl CommentStripper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last stripped line ended inside a comment
    pub fn in_comment(&self) -> bool {
        self.in_comment
    }

    /// Return `line` with every comment span removed.
    pub fn strip(&mut self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut rest = line;

        loop {
            if self.in_comment {
                match rest.find("*/") {
                    Some(end) => {
                        rest = &rest[end + 2..];
                        self.in_comment = false;
                    }
                    None => return out,
                }
            }

            match rest.find("/*") {
                Some(start) => {
                    out.push_str(&rest[..start]);
                    rest = &rest[start + 2..];
                    self.in_comment = true;
                }
                None => {
                    out.push_str(rest);
                    return out;
                }
            }
        }
    }
}
