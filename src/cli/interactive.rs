//! Interactive mode.
//!
//! Prompts for the four inputs, with the previous answers as defaults, renders the
//! outcome and asks whether to go again.

use chrono::NaiveDate;
use dialoguer::{Confirm, Input};
use power_rain::{InputState, LatLon, Presenter, RawSource, Session};
use std::io;

pub fn run<S: RawSource>(
    session: &mut Session<S>,
    presenter: &Presenter,
    initial: InputState,
) -> dialoguer::Result<()> {
    presenter.render_header(&mut io::stdout().lock())?;

    let mut inputs = initial;
    loop {
        inputs = prompt_inputs(inputs)?;
        println!();
        let outcome = session.update(inputs);
        presenter.render(&mut io::stdout().lock(), outcome)?;
        println!();

        if !Confirm::new()
            .with_prompt("Change the inputs?")
            .default(true)
            .interact()?
        {
            return Ok(());
        }
    }
}

fn prompt_inputs(current: InputState) -> dialoguer::Result<InputState> {
    let latitude: f64 = Input::new()
        .with_prompt("Latitude")
        .default(current.location.latitude())
        .interact_text()?;

    let longitude: f64 = Input::new()
        .with_prompt("Longitude")
        .default(current.location.longitude())
        .interact_text()?;

    let start: NaiveDate = Input::new()
        .with_prompt("Start date (YYYY-MM-DD)")
        .default(current.start)
        .interact_text()?;

    let end: NaiveDate = Input::new()
        .with_prompt("End date (YYYY-MM-DD)")
        .default(current.end)
        .interact_text()?;

    Ok(InputState {
        location: LatLon(latitude, longitude),
        start,
        end,
    })
}
