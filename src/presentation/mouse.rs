/// A pointing device whose button state can be polled.
pub trait Mouse {
    /// Current pressed state of the left, middle and right buttons.
    fn pressed(&mut self) -> [bool; 3];
}

/// Adds click waiting to an owned [`Mouse`].
///
/// # Examples
///
/// ```
/// use experiment_tools::presentation::{ClickWaiter, Mouse};
///
/// struct Scripted(Vec<[bool; 3]>);
/// impl Mouse for Scripted {
///     fn pressed(&mut self) -> [bool; 3] {
///         if self.0.is_empty() { [false; 3] } else { self.0.remove(0) }
///     }
/// }
///
/// let mouse = Scripted(vec![[false; 3], [true, false, false], [false; 3]]);
/// let mut waiter = ClickWaiter::new(mouse);
/// waiter.wait_for_click();
/// assert!(waiter.into_inner().0.is_empty());
/// ```
#[derive(Debug)]
pub struct ClickWaiter<M> {
    mouse: M,
}

impl<M: Mouse> ClickWaiter<M> {
    /// Wrap `mouse`.
    pub fn new(mouse: M) -> Self {
        Self { mouse }
    }

    /// The wrapped mouse.
    pub fn get_ref(&self) -> &M {
        &self.mouse
    }

    /// The wrapped mouse, mutably.
    pub fn get_mut(&mut self) -> &mut M {
        &mut self.mouse
    }

    /// Consume the waiter and return the mouse.
    pub fn into_inner(self) -> M {
        self.mouse
    }

    /// Block until any button is pressed and then every button is released.
    pub fn wait_for_click(&mut self) {
        while !self.any_pressed() {
            core::hint::spin_loop();
        }
        while self.any_pressed() {
            core::hint::spin_loop();
        }
    }

    fn any_pressed(&mut self) -> bool {
        self.mouse.pressed().iter().any(|&b| b)
    }
}
