/// The ordered tensors a callable returned.
///
/// Callables may return a bare tensor, a tuple of up to four tensors, an
/// array or a `Vec`; each converts into `Outputs` so that a single value is
/// treated as a one-element collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Outputs<T>(pub Vec<T>);

impl<T> Outputs<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<T> for Outputs<T> {
    fn from(value: T) -> Self {
        Outputs(vec![value])
    }
}

impl<T> From<(T, T)> for Outputs<T> {
    fn from((a, b): (T, T)) -> Self {
        Outputs(vec![a, b])
    }
}

impl<T> From<(T, T, T)> for Outputs<T> {
    fn from((a, b, c): (T, T, T)) -> Self {
        Outputs(vec![a, b, c])
    }
}

impl<T> From<(T, T, T, T)> for Outputs<T> {
    fn from((a, b, c, d): (T, T, T, T)) -> Self {
        Outputs(vec![a, b, c, d])
    }
}

impl<T> From<Vec<T>> for Outputs<T> {
    fn from(values: Vec<T>) -> Self {
        Outputs(values)
    }
}

impl<T, const N: usize> From<[T; N]> for Outputs<T> {
    fn from(values: [T; N]) -> Self {
        Outputs(Vec::from(values))
    }
}

impl<'a, T> IntoIterator for &'a Outputs<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
