/// Result of loading an entity by key.
///
/// Absence is an ordinary outcome for the mapper (events may reference agents
/// it has never seen), so it gets its own variant instead of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Lookup<U>, E> {
        match self {
            Lookup::Found(v) => f(v).map(Lookup::Found),
            Lookup::NotFound => Ok(Lookup::NotFound),
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_and_option() {
        let found = Lookup::Found(2).map(|v| v * 10);
        assert_eq!(found, Lookup::Found(20));
        assert_eq!(found.into_option(), Some(20));

        let missing: Lookup<i32> = None.into();
        assert!(!missing.is_found());
        assert_eq!(missing.map(|v| v + 1), Lookup::NotFound);
    }

    #[test]
    fn test_try_map_propagates_error() {
        let res: Result<Lookup<i32>, &str> = Lookup::Found(1).try_map(|_| Err("boom"));
        assert_eq!(res, Err("boom"));
        let res: Result<Lookup<i32>, &str> = Lookup::NotFound.try_map(|_: i32| Err("boom"));
        assert_eq!(res, Ok(Lookup::NotFound));
    }
}
