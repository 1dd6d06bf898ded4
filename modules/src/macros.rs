/// Downcasts each expression to the given enum variant, yielding `Some` of the unwrapped
/// values only if every one of them matches. Several pairs produce nested tuples.
#[macro_export]
macro_rules! downcast {
    ( $e1:expr => $p1:path, $( $e:expr => $p:path ),+ $(,)? ) => {
        $crate::downcast!($e1 => $p1).zip($crate::downcast!($($e => $p),+))
    };

    ($e:expr => $p:path) => {
        match $e {
            $p(e) => Some(e),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    };

    () => {
        None
    }
}
