//! Integer code → label tables for upstream enum values.
//!
//! Each table is declared once through `label_table!`, which generates a lookup
//! function returning the glyph-prefixed label. Codes missing from a table resolve
//! to a fallback that embeds the raw code, so a newer server introducing a value
//! never breaks a render.
//!
//! ```
//! use bdsquery::render::labels::{dimension_label, game_mode_label};
//! assert_eq!(dimension_label(1), "🔥 下界");
//! assert_eq!(game_mode_label(42), "❓ 未知 (42)");
//! ```

macro_rules! label_table {
    ( $(#[$meta:meta])* $name:ident { $( $code:literal => ($glyph:literal, $label:literal) ),+ $(,)? } ) => {
        $(#[$meta])*
        pub fn $name(code: i64) -> String {
            match code {
                $( $code => concat!($glyph, " ", $label).to_string(), )+
                other => unknown_label(other),
            }
        }
    };
}

/// Fallback label for codes no table knows about
pub fn unknown_label(code: i64) -> String {
    format!("❓ 未知 ({})", code)
}

label_table! {
    /// Bedrock game mode
    game_mode_label {
        0 => ("🗡️", "生存"),
        1 => ("🎨", "创造"),
        2 => ("🗺️", "冒险"),
        3 => ("👁️", "生存旁观"),
        4 => ("👁️", "创造旁观"),
        5 => ("⚙️", "默认"),
        6 => ("👻", "旁观"),
    }
}

label_table! {
    /// Player permission level
    permission_label {
        0 => ("👤", "访客"),
        1 => ("🙂", "成员"),
        2 => ("🛡️", "管理员"),
        3 => ("🔧", "自定义"),
    }
}

label_table! {
    /// Dimension id from `pos.dimId`
    dimension_label {
        0 => ("🌍", "主世界"),
        1 => ("🔥", "下界"),
        2 => ("🌌", "末地"),
    }
}

label_table! {
    /// Client input mode from `device.inputMode`
    input_mode_label {
        0 => ("❔", "未定义"),
        1 => ("⌨️", "键鼠"),
        2 => ("📱", "触屏"),
        3 => ("🎮", "手柄"),
        4 => ("🥽", "动作控制器"),
    }
}
