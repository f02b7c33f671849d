//! Transcendental functions on fixed-point numbers.
//!
//! Every algorithm here works purely on scaled integers: power series
//! with rational term recurrences, Newton–Raphson iteration, and
//! argument range reduction.  The shared termination rule is *term
//! underflow*: a series stops exactly when its next term's scaled value
//! rounds to zero, backed by an explicit iteration cap so that a
//! mis-configured precision can never hang the caller.
//!
//! | Submodule | Functions |
//! |-----------|-----------|
//! | `elementary` | `sqrt`, `int_power`, `pow`, `exp`, `ln`, `log2` |
//! | `trig` | `sin`, `cos`, `sincos`, `tan` |
//! | `inverse` | `asin`, `acos`, `atan` |

mod elementary;
mod inverse;
mod trig;
