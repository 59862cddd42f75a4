use std::mem;

/// Expressions of ApoML, a small calculator language with bounded
/// nondeterministic inputs:
///
/// ```text
/// let interest = ?[0, 100] in
/// let startfund = ? in
/// startfund * (100 + interest)
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ApoExp {
    IntLit(i64),
    UnaryMin(Box<ApoExp>),
    Mult(Box<ApoExp>, Box<ApoExp>),
    Plus(Box<ApoExp>, Box<ApoExp>),
    /// Ask for an integer in the inclusive range `from..=to`.
    Input { from: i64, to: i64 },
    LetIn {
        name: String,
        fst: Box<ApoExp>,
        snd: Box<ApoExp>,
    },
    Var(String),
}

impl ApoExp {
    pub fn unary_min(exp: ApoExp) -> Self {
        ApoExp::UnaryMin(Box::new(exp))
    }

    pub fn mult(left: ApoExp, right: ApoExp) -> Self {
        ApoExp::Mult(Box::new(left), Box::new(right))
    }

    pub fn plus(left: ApoExp, right: ApoExp) -> Self {
        ApoExp::Plus(Box::new(left), Box::new(right))
    }

    pub const fn input(from: i64, to: i64) -> Self {
        ApoExp::Input { from, to }
    }

    /// An input over the whole `i64` range, as written by a bare `?`.
    pub const fn unbounded_input() -> Self {
        ApoExp::Input {
            from: i64::MIN,
            to: i64::MAX,
        }
    }

    pub fn let_in(name: impl Into<String>, fst: ApoExp, snd: ApoExp) -> Self {
        ApoExp::LetIn {
            name: name.into(),
            fst: Box::new(fst),
            snd: Box::new(snd),
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        ApoExp::Var(name.into())
    }

    /// Move the subexpressions out onto `pending`, leaving literals behind.
    fn take_children(&mut self, pending: &mut Vec<ApoExp>) {
        let mut take = |child: &mut Box<ApoExp>| {
            pending.push(mem::replace(&mut **child, ApoExp::IntLit(0)));
        };
        match self {
            ApoExp::UnaryMin(exp) => take(exp),
            ApoExp::Mult(left, right) | ApoExp::Plus(left, right) => {
                take(left);
                take(right);
            }
            ApoExp::LetIn { fst, snd, .. } => {
                take(fst);
                take(snd);
            }
            ApoExp::IntLit(_) | ApoExp::Input { .. } | ApoExp::Var(_) => {}
        }
    }
}

/// Tears the tree down with an explicit stack instead of one call per level.
impl Drop for ApoExp {
    fn drop(&mut self) {
        let mut pending = vec![];
        self.take_children(&mut pending);
        while let Some(mut exp) = pending.pop() {
            exp.take_children(&mut pending);
        }
    }
}
