//! Gain control over chunked sample sources.
//!
//! Sample sources in an SDR pipeline typically yield `Result<Vec<Complex<T>>, E>`
//! chunks, either synchronously (an [`Iterator`]) or asynchronously (a
//! [`Stream`]). The adapters here run every chunk through one [`Agc`] in
//! order, so gain state carries across chunk boundaries. Errors from the
//! source are passed through untouched.

use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::Stream;
use num_complex::Complex;

use crate::dsp::agc::Agc;
use crate::dsp::Sample;

/**
 * Synchronous gain-controlled source (iterable)
 */
#[derive(Debug)]
pub struct AgcIter<I, T = f32> {
    inner: I,
    agc: Agc<T>,
}

impl<I, T: Sample> AgcIter<I, T> {
    /// Wrap a chunk iterator with an AGC.
    pub fn new(inner: I, agc: Agc<T>) -> Self {
        Self { inner, agc }
    }

    /// The AGC driving this source, for telemetry.
    pub fn agc(&self) -> &Agc<T> {
        &self.agc
    }

    /// Mutable access to the AGC, e.g. to lock it once acquired.
    pub fn agc_mut(&mut self) -> &mut Agc<T> {
        &mut self.agc
    }

    /// Release the wrapped source and the AGC.
    pub fn into_inner(self) -> (I, Agc<T>) {
        (self.inner, self.agc)
    }
}

impl<I, T, E> Iterator for AgcIter<I, T>
where
    I: Iterator<Item = Result<Vec<Complex<T>>, E>>,
    T: Sample,
{
    type Item = Result<Vec<Complex<T>>, E>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk = self.inner.next()?;
        Some(chunk.map(|mut samples| {
            self.agc.execute_in_place(&mut samples);
            samples
        }))
    }
}

/**
 * Asynchronous gain-controlled source (streamable)
 */
#[derive(Debug)]
pub struct AgcStream<S, T = f32> {
    inner: S,
    agc: Agc<T>,
}

impl<S, T: Sample> AgcStream<S, T> {
    /// Wrap a chunk stream with an AGC.
    pub fn new(inner: S, agc: Agc<T>) -> Self {
        Self { inner, agc }
    }

    /// The AGC driving this stream, for telemetry.
    pub fn agc(&self) -> &Agc<T> {
        &self.agc
    }

    /// Mutable access to the AGC, e.g. to lock it once acquired.
    pub fn agc_mut(&mut self) -> &mut Agc<T> {
        &mut self.agc
    }

    /// Release the wrapped stream and the AGC.
    pub fn into_inner(self) -> (S, Agc<T>) {
        (self.inner, self.agc)
    }
}

impl<S, T, E> Stream for AgcStream<S, T>
where
    S: Stream<Item = Result<Vec<Complex<T>>, E>> + Unpin,
    T: Sample,
{
    type Item = Result<Vec<Complex<T>>, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(mut samples))) => {
                this.agc.execute_in_place(&mut samples);
                Poll::Ready(Some(Ok(samples)))
            }
            other => other,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
