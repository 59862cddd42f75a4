use std::fmt::{self, Display, Formatter};

use crate::syntax::ApoExp;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
    None,
}

impl ApoExp {
    /// Binding power, matching the layers of the grammar.
    const fn precedence(&self) -> u8 {
        match self {
            ApoExp::LetIn { .. } => 1,
            ApoExp::Plus(..) => 2,
            ApoExp::Mult(..) => 3,
            ApoExp::IntLit(_) | ApoExp::UnaryMin(_) | ApoExp::Input { .. } | ApoExp::Var(_) => 4,
        }
    }

    const fn associativity(&self) -> Assoc {
        match self {
            ApoExp::Plus(..) | ApoExp::Mult(..) => Assoc::Left,
            ApoExp::UnaryMin(_) => Assoc::Right,
            ApoExp::IntLit(_) | ApoExp::Input { .. } | ApoExp::LetIn { .. } | ApoExp::Var(_) => {
                Assoc::None
            }
        }
    }

    /// Write `self`, parenthesized if it binds looser than `level`.
    fn fmt_at(&self, level: u8, f: &mut Formatter<'_>) -> fmt::Result {
        let prec = self.precedence();
        let (prec_left, prec_right) = match self.associativity() {
            Assoc::Left => (prec, prec + 1),
            Assoc::Right | Assoc::None => (prec + 1, prec),
        };

        let parens = prec < level;
        if parens {
            write!(f, "(")?;
        }
        match self {
            ApoExp::IntLit(value) => write!(f, "{value}")?,
            ApoExp::UnaryMin(exp) => {
                write!(f, "-")?;
                exp.fmt_at(prec, f)?;
            }
            ApoExp::Mult(..) | ApoExp::Plus(..) => self.fmt_chain(f)?,
            ApoExp::Input {
                from: i64::MIN,
                to: i64::MAX,
            } => write!(f, "?")?,
            ApoExp::Input { from, to } => write!(f, "?[{from}, {to}]")?,
            ApoExp::LetIn { name, fst, snd } => {
                write!(f, "let {name} = ")?;
                fst.fmt_at(prec_left, f)?;
                write!(f, " in ")?;
                snd.fmt_at(prec_right, f)?;
            }
            ApoExp::Var(name) => write!(f, "{name}")?,
        }
        if parens {
            write!(f, ")")?;
        }
        Ok(())
    }
}

impl ApoExp {
    /// Write a run of the same operator nested on the left, such as
    /// `1 + 2 + 3`, with a loop over its operands.
    fn fmt_chain(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let prec = self.precedence();
        let symbol = match self {
            ApoExp::Mult(..) => " * ",
            _ => " + ",
        };
        let mut rights = vec![];
        let mut leftmost = self;
        loop {
            match leftmost {
                ApoExp::Mult(left, right) | ApoExp::Plus(left, right)
                    if leftmost.precedence() == prec =>
                {
                    rights.push(right.as_ref());
                    leftmost = left.as_ref();
                }
                _ => break,
            }
        }

        leftmost.fmt_at(prec, f)?;
        for right in rights.into_iter().rev() {
            write!(f, "{symbol}")?;
            right.fmt_at(prec + 1, f)?;
        }
        Ok(())
    }
}

impl Display for ApoExp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_at(0, f)
    }
}
