//! Element-wise numeric stages.

use std::collections::VecDeque;

use num_traits::NumCast;

use super::operate::operate;
use super::stream::{map, rendezvous, spawn_stage, Stream};
use super::Number;

/// For every position `i >= before`, emits `value[i] - value[i - before]`.
///
/// The first `before` positions produce nothing, so the output is `before`
/// elements shorter than the input.
pub fn change<T>(input: Stream<T>, before: usize) -> Stream<T>
where
    T: Number,
{
    let (tx, output) = rendezvous();
    spawn_stage("change", move || {
        let mut window = VecDeque::with_capacity(before + 1);
        for value in input {
            window.push_back(value);
            if window.len() > before {
                if let Some(oldest) = window.pop_front() {
                    if tx.send(value - oldest).is_err() {
                        break;
                    }
                }
            }
        }
    });
    output
}

/// Emits a running count starting at `from`, one output per input element.
///
/// The input elements themselves are ignored; only their arrival counts.
pub fn count<T, O>(from: T, input: Stream<O>) -> Stream<T>
where
    T: Number,
    O: Send + 'static,
{
    let mut current = from;
    map(input, move |_| {
        let value = current;
        current = current + T::one();
        value
    })
}

/// Subtracts `amount` from every element.
pub fn decrement_by<T>(input: Stream<T>, amount: T) -> Stream<T>
where
    T: Number,
{
    map(input, move |value| value - amount)
}

/// Multiplies every element by `factor`.
pub fn multiply_by<T>(input: Stream<T>, factor: T) -> Stream<T>
where
    T: Number,
{
    map(input, move |value| value * factor)
}

/// Square root of every element.
///
/// A negative element yields NaN for float element types. Integer element
/// types cannot represent NaN and yield zero instead; positive integer roots
/// are truncated toward zero.
pub fn sqrt<T>(input: Stream<T>) -> Stream<T>
where
    T: Number,
{
    map(input, |value: T| {
        let root = value.to_f64().map_or(f64::NAN, f64::sqrt);
        <T as NumCast>::from(root).unwrap_or_else(T::zero)
    })
}

/// Element-wise `a + b` over two aligned streams.
pub fn add<T>(a: Stream<T>, b: Stream<T>) -> Stream<T>
where
    T: Number,
{
    operate(a, b, |x, y| x + y)
}

/// Element-wise `a - b` over two aligned streams.
pub fn subtract<T>(a: Stream<T>, b: Stream<T>) -> Stream<T>
where
    T: Number,
{
    operate(a, b, |x, y| x - y)
}

/// Element-wise `a / b` over two aligned streams.
pub fn divide<T>(a: Stream<T>, b: Stream<T>) -> Stream<T>
where
    T: Number,
{
    operate(a, b, |x, y| x / y)
}
