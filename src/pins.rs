//! GPIO / peripheral pin assignments for the DoorGuard panel board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Indicator LEDs (active HIGH)
// ---------------------------------------------------------------------------

/// Green LED: door open.
pub const LED_DOOR_GPIO: i32 = 11;
/// Blue LED: motion detected.
pub const LED_MOTION_GPIO: i32 = 12;
/// Red LED: alarm active.
pub const LED_ALARM_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Buttons (active-low with internal pull-up, falling-edge IRQ)
// ---------------------------------------------------------------------------

/// Button A: open / close the door.
pub const BUTTON_DOOR_GPIO: i32 = 5;
/// Button B: toggle simulated owner proximity.
pub const BUTTON_PROXIMITY_GPIO: i32 = 6;
/// Joystick push switch: trigger the alarm.
pub const BUTTON_ALARM_GPIO: i32 = 22;

// ---------------------------------------------------------------------------
// Buzzer (passive, square-wave driven)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// Joystick, analog (ADC)
// ---------------------------------------------------------------------------

/// X axis.  ADC channel = GPIO - 26.
pub const JOYSTICK_X_GPIO: i32 = 26;
/// Y axis.
pub const JOYSTICK_Y_GPIO: i32 = 27;
/// First GPIO wired to the ADC mux; channel index is relative to it.
pub const ADC_BASE_GPIO: i32 = 26;
/// Full-scale 12-bit reading.
pub const ADC_MAX: u16 = 4095;

// ---------------------------------------------------------------------------
// I²C bus: SSD1306 OLED
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;
/// 7-bit I²C address of the display.
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;
pub const DISPLAY_WIDTH_PX: u16 = 128;
pub const DISPLAY_HEIGHT_PX: u16 = 64;

/// Left margin of every text row (pixels).
pub const DISPLAY_TEXT_X: u16 = 10;
/// Baseline y coordinate of each of the four text rows (pixels).
pub const DISPLAY_ROW_Y: [u16; 4] = [10, 20, 30, 40];
