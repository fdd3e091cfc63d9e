/// Viewports at or above this width get the wide layout, the pinned footer
/// and the full render profile.
pub const WIDE_BREAKPOINT: f64 = 768.0;

pub const SHOP_NAME: &str = "Mankind Gentlemen Barber Shop";
pub const PHONE_DISPLAY: &str = "+971 2 444 1234";
pub const PHONE_LINK: &str = "tel:+97124441234";
pub const EMAIL: &str = "Mankindgentsalon@gmail.com";
pub const BOOKING_ANCHOR: &str = "#contact";
pub const GOOGLE_REVIEW_LINK: &str = "https://www.google.com/maps/place/Mankind+Gentlemen+Barbershop/@24.4980465,54.4054845,17z/data=!4m17!1m8!3m7!1s0x3e5e670c1c7a8867:0x6a29da3a8fd499a7!2sMankind+Gentlemen+Barbershop!8m2!3d24.4980498!4d54.4053779!10e1!16s%2Fg%2F11qq5r8zp_!3m7!1s0x3e5e670c1c7a8867:0x6a29da3a8fd499a7!8m2!3d24.4980498!4d54.4053779!9m1!1b1!16s%2Fg%2F11qq5r8zp_?entry=ttu&g_ep=EgoyMDI2MDIxMS4wIKXMDSoASAFQAw%3D%3D";
pub const MAP_EMBED_URL: &str = "https://www.google.com/maps/embed?pb=!1m14!1m8!1m3!1d3630.6365591532253!2d54.4054845!3d24.4980465!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3e5e670c1c7a8867%3A0x6a29da3a8fd499a7!2sMankind%20Gentlemen%20Barbershop!5e0!3m2!1sen!2sng!4v1771013184612!5m2!1sen!2sng";

/// Shop location, degrees.
pub const SHOP_LATITUDE: f32 = 24.4980;
pub const SHOP_LONGITUDE: f32 = 54.4054;

pub fn get_backend_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or("")
}
