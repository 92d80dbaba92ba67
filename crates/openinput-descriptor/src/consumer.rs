//! Callback interface for decoded input-report fields.

/// Receives the fields of one input report as the descriptor walk decodes
/// them.
///
/// For every non-constant Input item the parser calls [`input_begin`] once,
/// then [`input_data`] once per delivered field. [`input_end`] fires when
/// the walk leaves the outermost collection. Implementations accumulate
/// state across `input_data` calls and publish it on `input_end`.
///
/// [`input_begin`]: HidReportConsumer::input_begin
/// [`input_data`]: HidReportConsumer::input_data
/// [`input_end`]: HidReportConsumer::input_end
pub trait HidReportConsumer {
    /// Announces a run of fields under `top_usage`
    /// (`usage_page << 16 | usage` of the enclosing top-level collection).
    fn input_begin(&mut self, top_usage: u32, report_type: u32, logical_min: i32, logical_max: i32) {
        let _ = (top_usage, report_type, logical_min, logical_max);
    }

    /// Delivers one decoded field. `usage` is `usage_page << 16 | usage`;
    /// `value` is sign-extended when the item's logical minimum is negative.
    fn input_data(&mut self, usage: u32, value: i32);

    /// The walk has returned to collection depth zero.
    fn input_end(&mut self) {}
}
