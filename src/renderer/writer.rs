use std::borrow::Cow;

use smallvec::SmallVec;

use super::config::PlaceholderStyle;
use super::error::Result;

pub struct SqlWriter {
    pub buf: String,
    pub next_param_idx: usize, // 1-based для $1/$2..., игнорится при '?'
    /// Сколько позиционных `?` уже напечатано
    pub positional: usize,
    pub placeholders: PlaceholderStyle,
}

impl SqlWriter {
    pub fn new(cap: usize, placeholders: PlaceholderStyle) -> Self {
        Self {
            buf: String::with_capacity(cap),
            next_param_idx: 1,
            positional: 0,
            placeholders,
        }
    }

    #[inline]
    pub fn push<S: AsRef<str>>(&mut self, s: S) {
        self.buf.push_str(s.as_ref());
    }

    #[inline]
    pub fn push_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// Вставляет плейсхолдер (увеличивая счётчик при Numbered)
    pub fn push_placeholder(&mut self) {
        match self.placeholders {
            PlaceholderStyle::Question => self.push_question(),
            PlaceholderStyle::Numbered => {
                let i = self.next_param_idx;
                self.next_param_idx += 1;
                self.buf.push('$');
                self.push_u64(i as u64);
            }
        }
    }

    #[inline]
    pub fn push_question(&mut self) {
        self.positional += 1;
        self.buf.push('?');
    }

    pub fn finish(self) -> String {
        self.buf
    }

    #[inline]
    pub fn push_u64(&mut self, v: u64) {
        let mut buf = itoa::Buffer::new();
        self.buf.push_str(buf.format(v));
    }

    #[inline]
    pub fn push_sep(&mut self, i: usize, sep: &str) {
        if i > 0 {
            self.buf.push_str(sep);
        }
    }

    /// Рендерит под-дерево в отдельную строку, не сбрасывая счётчик плейсхолдеров.
    ///
    /// Нужно там, где фрагменты сначала собираются, а потом склеиваются
    /// через [`Fragments`].
    pub fn capture<F>(&mut self, f: F) -> Result<String>
    where
        F: FnOnce(&mut SqlWriter) -> Result<()>,
    {
        let start = self.buf.len();
        let res = f(self);
        let out = self.buf.split_off(start);
        res.map(|_| out)
    }
}

/// Упорядоченный набор необязательных фрагментов SQL.
///
/// Пустые и отсутствующие куски отбрасываются при добавлении, поэтому
/// итоговая склейка никогда не даёт двойных пробелов и висящих разделителей.
#[derive(Debug, Default)]
pub struct Fragments<'a> {
    parts: SmallVec<[Cow<'a, str>; 8]>,
}

impl<'a> Fragments<'a> {
    pub fn new() -> Self {
        Self {
            parts: SmallVec::new(),
        }
    }

    #[inline]
    pub fn push<S: Into<Cow<'a, str>>>(&mut self, s: S) -> &mut Self {
        let s = s.into();
        if !s.is_empty() {
            self.parts.push(s);
        }
        self
    }

    #[inline]
    pub fn push_opt<S: Into<Cow<'a, str>>>(&mut self, s: Option<S>) -> &mut Self {
        if let Some(s) = s {
            self.push(s);
        }
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn join(&self, sep: &str) -> String {
        self.parts.join(sep)
    }

    /// Склейка без разделителя: пробелы уже зашиты в сами фрагменты.
    pub fn concat(&self) -> String {
        self.parts.concat()
    }
}

impl<'a, S: Into<Cow<'a, str>>> FromIterator<S> for Fragments<'a> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut f = Fragments::new();
        for s in iter {
            f.push(s);
        }
        f
    }
}

/// Нормализация регистра ключевых слов.
#[inline]
pub fn to_upper(token: &str) -> Cow<'_, str> {
    if token.bytes().any(|b| b.is_ascii_lowercase()) {
        Cow::Owned(token.to_ascii_uppercase())
    } else {
        Cow::Borrowed(token)
    }
}

#[inline]
pub fn to_upper_opt(token: Option<&str>) -> Option<Cow<'_, str>> {
    token.map(to_upper)
}

/// Пустая строка в необязательном поле равносильна его отсутствию.
#[inline]
pub(crate) fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}
