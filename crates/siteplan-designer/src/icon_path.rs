//! Fixed vector icons.
//!
//! The septic field symbol is stored as SVG path data and parsed once into a
//! lyon [`Path`]. The parser understands the subset that icon data uses:
//! move, line, horizontal/vertical line, cubic and smooth cubic curves and
//! close, in both absolute and relative form.

use lyon::math::{point, Box2D, Point as LyonPoint};
use lyon::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Septic field outline in its own 0..~130 unit frame.
pub const SEPTIC_PATH_DATA: &str = "M82.844,107.964h0s-.039.295-.039.295c-2.518,18.994-29.278,20.857-34.404,2.395h0s-.076.07-.076.07c-14.047,12.967-35.751-2.724-27.842-20.128h0s0,0,0,0c-19.1.985-25.77-24.958-8.564-33.308l.235-.114h0c-15.293-11.62-3.665-35.853,14.968-31.195l.189.047-.042-.19C23.123,7.083,47.666-3.876,58.863,11.729h0s.121-.232.121-.232c8.818-16.971,34.568-9.593,33.061,9.473h0s0,0,0,0c17.614-7.43,32.705,14.696,19.358,28.383l-.072.074h0c18.314,5.63,15.719,32.329-3.337,34.326l-.296.031h0c10.366,16.211-8.932,34.987-24.853,24.181Z";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathParseError {
    #[error("Unsupported path command '{0}'")]
    UnsupportedCommand(char),
    #[error("Path command '{0}' is missing coordinates")]
    MissingCoordinates(char),
    #[error("Invalid number '{0}' in path data")]
    InvalidNumber(String),
    #[error("Path data must start with a move command")]
    MissingMove,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Command(char),
    Number(f32),
}

fn tokenize(data: &str) -> Result<Vec<Token>, PathParseError> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = data.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_alphabetic() && c != 'e' && c != 'E' {
            tokens.push(Token::Command(c));
            i += 1;
        } else if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() {
            let start = i;
            let mut seen_dot = false;
            let mut seen_exp = false;
            i += 1;
            if c == '.' {
                seen_dot = true;
            }
            while i < chars.len() {
                let d = chars[i];
                if d.is_ascii_digit() {
                    i += 1;
                } else if d == '.' && !seen_dot && !seen_exp {
                    seen_dot = true;
                    i += 1;
                } else if (d == 'e' || d == 'E') && !seen_exp {
                    seen_exp = true;
                    i += 1;
                    if i < chars.len() && (chars[i] == '-' || chars[i] == '+') {
                        i += 1;
                    }
                } else {
                    break;
                }
            }
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f32>()
                .map_err(|_| PathParseError::InvalidNumber(text.clone()))?;
            tokens.push(Token::Number(value));
        } else {
            // separators
            i += 1;
        }
    }

    Ok(tokens)
}

struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    fn next_number(&mut self) -> Option<f32> {
        match self.tokens.get(self.pos) {
            Some(Token::Number(n)) => {
                self.pos += 1;
                Some(*n)
            }
            _ => None,
        }
    }

    fn numbers<const N: usize>(&mut self, cmd: char) -> Result<[f32; N], PathParseError> {
        let mut out = [0.0; N];
        for slot in out.iter_mut() {
            *slot = self
                .next_number()
                .ok_or(PathParseError::MissingCoordinates(cmd))?;
        }
        Ok(out)
    }
}

/// Parses SVG path data into a lyon path.
pub fn parse_svg_path(data: &str) -> Result<Path, PathParseError> {
    let mut cursor = Cursor {
        tokens: tokenize(data)?,
        pos: 0,
    };
    let mut builder = Path::builder();

    let mut current = point(0.0, 0.0);
    let mut subpath_start = point(0.0, 0.0);
    let mut last_ctrl: Option<LyonPoint> = None;
    let mut open = false;
    let mut command: Option<char> = None;

    while cursor.pos < cursor.tokens.len() {
        let cmd = match &cursor.tokens[cursor.pos] {
            Token::Command(c) => {
                cursor.pos += 1;
                *c
            }
            // Implicit repetition of the previous command
            Token::Number(_) => match command {
                Some('M') => 'L',
                Some('m') => 'l',
                Some('Z' | 'z') | None => return Err(PathParseError::MissingMove),
                Some(c) => c,
            },
        };
        let relative = cmd.is_ascii_lowercase();
        let base = if relative { current } else { point(0.0, 0.0) };

        match cmd.to_ascii_uppercase() {
            'M' => {
                let [x, y] = cursor.numbers::<2>(cmd)?;
                if open {
                    builder.end(false);
                }
                current = point(base.x + x, base.y + y);
                subpath_start = current;
                builder.begin(current);
                open = true;
                last_ctrl = None;
            }
            'Z' => {
                if open {
                    builder.end(true);
                    open = false;
                }
                current = subpath_start;
                last_ctrl = None;
            }
            other => {
                if !open {
                    if command.is_none() {
                        return Err(PathParseError::MissingMove);
                    }
                    builder.begin(current);
                    subpath_start = current;
                    open = true;
                }
                match other {
                    'L' => {
                        let [x, y] = cursor.numbers::<2>(cmd)?;
                        current = point(base.x + x, base.y + y);
                        builder.line_to(current);
                        last_ctrl = None;
                    }
                    'H' => {
                        let [x] = cursor.numbers::<1>(cmd)?;
                        current = point(base.x + x, current.y);
                        builder.line_to(current);
                        last_ctrl = None;
                    }
                    'V' => {
                        let [y] = cursor.numbers::<1>(cmd)?;
                        current = point(current.x, base.y + y);
                        builder.line_to(current);
                        last_ctrl = None;
                    }
                    'C' => {
                        let [x1, y1, x2, y2, x, y] = cursor.numbers::<6>(cmd)?;
                        let c1 = point(base.x + x1, base.y + y1);
                        let c2 = point(base.x + x2, base.y + y2);
                        current = point(base.x + x, base.y + y);
                        builder.cubic_bezier_to(c1, c2, current);
                        last_ctrl = Some(c2);
                    }
                    'S' => {
                        let [x2, y2, x, y] = cursor.numbers::<4>(cmd)?;
                        // Reflection of the previous second control point
                        let c1 = match last_ctrl {
                            Some(prev) => point(2.0 * current.x - prev.x, 2.0 * current.y - prev.y),
                            None => current,
                        };
                        let c2 = point(base.x + x2, base.y + y2);
                        current = point(base.x + x, base.y + y);
                        builder.cubic_bezier_to(c1, c2, current);
                        last_ctrl = Some(c2);
                    }
                    _ => return Err(PathParseError::UnsupportedCommand(cmd)),
                }
            }
        }

        command = Some(cmd);
    }

    if open {
        builder.end(false);
    }

    Ok(builder.build())
}

/// The parsed septic icon, cached for the process lifetime.
pub fn septic_path() -> &'static Path {
    static PATH: OnceLock<Path> = OnceLock::new();
    PATH.get_or_init(|| {
        parse_svg_path(SEPTIC_PATH_DATA).unwrap_or_else(|err| {
            tracing::warn!("Septic icon path failed to parse: {}", err);
            Path::new()
        })
    })
}

/// Bounds of the septic icon in its own unit frame.
pub fn septic_bounds() -> Box2D {
    lyon::algorithms::aabb::bounding_box(septic_path().iter())
}
