use yew::prelude::*;
use crate::config::BOOKING_ANCHOR;

#[function_component(BookingButton)]
pub fn booking_button() -> Html {
    html! {
        <a href={BOOKING_ANCHOR} class="booking-button" aria-label="Book an appointment">
            <span class="booking-icon" aria-hidden="true">{"\u{1F4C5}"}</span>
            <span class="booking-label">{"Book Now"}</span>
        </a>
    }
}
