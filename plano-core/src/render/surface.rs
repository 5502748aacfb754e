//! Execution of [`DrawCommand`]s on a concrete target (SVG document, browser canvas, …).

use crate::command::{DrawCommand, Frame};

pub trait Surface {
    type Error;

    fn draw(&mut self, command: &DrawCommand) -> Result<(), Self::Error>;

    fn render(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        for command in frame.iter() {
            self.draw(command)?;
        }
        Ok(())
    }
}
