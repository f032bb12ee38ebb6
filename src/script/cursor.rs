/// Byte cursor over one script line.
///
/// Every matcher either advances and returns `Some`, or returns `None` and leaves the cursor
/// where it was. `Copy` makes backtracking a plain assignment.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Run `f` on a copy and commit only if it matched.
    pub(crate) fn opt<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let mut probe = *self;
        let out = f(&mut probe);
        if out.is_some() {
            *self = probe;
        }
        out
    }

    /// `\s*`; returns the number of characters skipped.
    pub(crate) fn skip_ws(&mut self) -> usize {
        let mut n = 0;
        for ch in self.rest().chars() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
            n += 1;
        }
        n
    }

    /// `\s+`
    pub(crate) fn ws1(&mut self) -> Option<()> {
        self.opt(|c| (c.skip_ws() > 0).then_some(()))
    }

    /// ASCII keyword, case-insensitive.
    pub(crate) fn keyword(&mut self, kw: &str) -> Option<()> {
        let head = self.rest().get(..kw.len())?;
        if !head.eq_ignore_ascii_case(kw) {
            return None;
        }
        self.pos += kw.len();
        Some(())
    }

    pub(crate) fn char(&mut self, want: char) -> Option<()> {
        let ch = self.rest().chars().next()?;
        if ch != want {
            return None;
        }
        self.pos += ch.len_utf8();
        Some(())
    }

    pub(crate) fn char_ci(&mut self, want: char) -> Option<()> {
        let ch = self.rest().chars().next()?;
        if !ch.eq_ignore_ascii_case(&want) {
            return None;
        }
        self.pos += ch.len_utf8();
        Some(())
    }

    fn take_while1(&mut self, pred: impl Fn(char) -> bool) -> Option<&'a str> {
        let rest = self.rest();
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        self.pos += end;
        Some(&rest[..end])
    }

    /// `\d+` as a frame or cell count, saturating at `u32::MAX`.
    pub(crate) fn uint(&mut self) -> Option<u32> {
        let digits = self.take_while1(|ch| ch.is_ascii_digit())?;
        // A digit run only fails to parse on overflow.
        Some(digits.parse().unwrap_or(u32::MAX))
    }

    /// `[\d.]+` that parses as a real number.
    pub(crate) fn number(&mut self) -> Option<f64> {
        self.opt(|c| {
            c.take_while1(|ch| ch.is_ascii_digit() || ch == '.')?
                .parse()
                .ok()
        })
    }

    /// `[A-Za-z0-9_]+`
    pub(crate) fn word(&mut self) -> Option<&'a str> {
        self.take_while1(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    }

    /// `\S+`
    pub(crate) fn non_ws(&mut self) -> Option<&'a str> {
        self.take_while1(|ch| !ch.is_whitespace())
    }

    /// `"([^"]+)"`
    pub(crate) fn quoted(&mut self) -> Option<&'a str> {
        self.opt(|c| {
            c.char('"')?;
            let inner = c.take_while1(|ch| ch != '"')?;
            c.char('"')?;
            Some(inner)
        })
    }

    /// `\s*$`
    pub(crate) fn end(&mut self) -> Option<()> {
        self.opt(|c| {
            c.skip_ws();
            c.rest().is_empty().then_some(())
        })
    }
}
