//! The built-in reading palettes

use ratatui::style::Color;

use super::Theme;

/// Black on white
pub const LIGHT: Theme = Theme {
    name: "light",

    bg_primary: Color::Rgb(255, 255, 255),   // #ffffff
    bg_secondary: Color::Rgb(243, 244, 246), // #f3f4f6
    bg_tertiary: Color::Rgb(229, 231, 235),  // #e5e7eb

    fg_primary: Color::Rgb(31, 41, 55),      // #1f2937
    fg_secondary: Color::Rgb(17, 24, 39),    // #111827
    fg_muted: Color::Rgb(107, 114, 128),     // #6b7280

    accent_primary: Color::Rgb(37, 99, 235),   // #2563eb
    accent_secondary: Color::Rgb(124, 58, 237), // #7c3aed

    success: Color::Rgb(22, 163, 74), // #16a34a
    warning: Color::Rgb(217, 119, 6), // #d97706
    error: Color::Rgb(220, 38, 38),   // #dc2626
    info: Color::Rgb(8, 145, 178),    // #0891b2

    verse_number: Color::Rgb(37, 99, 235),   // #2563eb
    highlight_bg: Color::Rgb(254, 240, 138), // #fef08a
    highlight_fg: Color::Rgb(17, 24, 39),    // #111827

    border: Color::Rgb(209, 213, 219),         // #d1d5db
    border_focused: Color::Rgb(37, 99, 235),   // #2563eb
    selection: Color::Rgb(219, 234, 254),      // #dbeafe
    cursor: Color::Rgb(17, 24, 39),            // #111827
};

/// Warm brown on cream
pub const SEPIA: Theme = Theme {
    name: "sepia",

    bg_primary: Color::Rgb(251, 240, 217),   // #fbf0d9
    bg_secondary: Color::Rgb(244, 228, 194), // #f4e4c2
    bg_tertiary: Color::Rgb(233, 214, 175),  // #e9d6af

    fg_primary: Color::Rgb(95, 75, 50),      // #5f4b32
    fg_secondary: Color::Rgb(67, 52, 34),    // #433422
    fg_muted: Color::Rgb(142, 121, 92),      // #8e795c

    accent_primary: Color::Rgb(146, 84, 36),   // #925424
    accent_secondary: Color::Rgb(120, 90, 60), // #785a3c

    success: Color::Rgb(94, 122, 48), // #5e7a30
    warning: Color::Rgb(180, 110, 20), // #b46e14
    error: Color::Rgb(168, 50, 40),   // #a83228
    info: Color::Rgb(70, 110, 130),   // #466e82

    verse_number: Color::Rgb(146, 84, 36),   // #925424
    highlight_bg: Color::Rgb(240, 200, 120), // #f0c878
    highlight_fg: Color::Rgb(67, 52, 34),    // #433422

    border: Color::Rgb(214, 192, 150),         // #d6c096
    border_focused: Color::Rgb(146, 84, 36),   // #925424
    selection: Color::Rgb(236, 218, 180),      // #ecdab4
    cursor: Color::Rgb(67, 52, 34),            // #433422
};

/// Light grey on charcoal
pub const DARK: Theme = Theme {
    name: "dark",

    bg_primary: Color::Rgb(31, 41, 55),    // #1f2937
    bg_secondary: Color::Rgb(55, 65, 81),  // #374151
    bg_tertiary: Color::Rgb(75, 85, 99),   // #4b5563

    fg_primary: Color::Rgb(229, 231, 235),   // #e5e7eb
    fg_secondary: Color::Rgb(249, 250, 251), // #f9fafb
    fg_muted: Color::Rgb(156, 163, 175),     // #9ca3af

    accent_primary: Color::Rgb(96, 165, 250),   // #60a5fa
    accent_secondary: Color::Rgb(167, 139, 250), // #a78bfa

    success: Color::Rgb(74, 222, 128), // #4ade80
    warning: Color::Rgb(251, 191, 36), // #fbbf24
    error: Color::Rgb(248, 113, 113),  // #f87171
    info: Color::Rgb(34, 211, 238),    // #22d3ee

    verse_number: Color::Rgb(96, 165, 250),  // #60a5fa
    highlight_bg: Color::Rgb(133, 77, 14),   // #854d0e
    highlight_fg: Color::Rgb(254, 249, 195), // #fef9c3

    border: Color::Rgb(75, 85, 99),            // #4b5563
    border_focused: Color::Rgb(96, 165, 250),  // #60a5fa
    selection: Color::Rgb(30, 58, 138),        // #1e3a8a
    cursor: Color::Rgb(249, 250, 251),         // #f9fafb
};

/// Grey on true black
pub const BLACK: Theme = Theme {
    name: "black",

    bg_primary: Color::Rgb(0, 0, 0),       // #000000
    bg_secondary: Color::Rgb(17, 17, 17),  // #111111
    bg_tertiary: Color::Rgb(34, 34, 34),   // #222222

    fg_primary: Color::Rgb(209, 213, 219),   // #d1d5db
    fg_secondary: Color::Rgb(243, 244, 246), // #f3f4f6
    fg_muted: Color::Rgb(115, 115, 115),     // #737373

    accent_primary: Color::Rgb(147, 197, 253),  // #93c5fd
    accent_secondary: Color::Rgb(196, 181, 253), // #c4b5fd

    success: Color::Rgb(74, 222, 128), // #4ade80
    warning: Color::Rgb(250, 204, 21), // #facc15
    error: Color::Rgb(248, 113, 113),  // #f87171
    info: Color::Rgb(103, 232, 249),   // #67e8f9

    verse_number: Color::Rgb(147, 197, 253), // #93c5fd
    highlight_bg: Color::Rgb(113, 63, 18),   // #713f12
    highlight_fg: Color::Rgb(254, 249, 195), // #fef9c3

    border: Color::Rgb(51, 51, 51),            // #333333
    border_focused: Color::Rgb(147, 197, 253), // #93c5fd
    selection: Color::Rgb(23, 37, 84),         // #172554
    cursor: Color::Rgb(243, 244, 246),         // #f3f4f6
};

/// Dark brown on tan paper
pub const TAN: Theme = Theme {
    name: "tan",

    bg_primary: Color::Rgb(232, 215, 185),   // #e8d7b9
    bg_secondary: Color::Rgb(222, 202, 166), // #decaa6
    bg_tertiary: Color::Rgb(208, 186, 146),  // #d0ba92

    fg_primary: Color::Rgb(74, 55, 40),      // #4a3728
    fg_secondary: Color::Rgb(51, 37, 26),    // #33251a
    fg_muted: Color::Rgb(125, 103, 80),      // #7d6750

    accent_primary: Color::Rgb(128, 70, 27),   // #80461b
    accent_secondary: Color::Rgb(101, 67, 33), // #654321

    success: Color::Rgb(85, 107, 47), // #556b2f
    warning: Color::Rgb(160, 95, 10), // #a05f0a
    error: Color::Rgb(150, 40, 30),   // #96281e
    info: Color::Rgb(60, 100, 120),   // #3c6478

    verse_number: Color::Rgb(128, 70, 27),   // #80461b
    highlight_bg: Color::Rgb(222, 170, 90),  // #deaa5a
    highlight_fg: Color::Rgb(51, 37, 26),    // #33251a

    border: Color::Rgb(190, 165, 125),         // #bea57d
    border_focused: Color::Rgb(128, 70, 27),   // #80461b
    selection: Color::Rgb(214, 192, 150),      // #d6c096
    cursor: Color::Rgb(51, 37, 26),            // #33251a
};

/// Soft contrast on mid grey
pub const GRAY: Theme = Theme {
    name: "gray",

    bg_primary: Color::Rgb(75, 85, 99),     // #4b5563
    bg_secondary: Color::Rgb(85, 96, 111),  // #55606f
    bg_tertiary: Color::Rgb(107, 114, 128), // #6b7280

    fg_primary: Color::Rgb(229, 231, 235),   // #e5e7eb
    fg_secondary: Color::Rgb(255, 255, 255), // #ffffff
    fg_muted: Color::Rgb(190, 195, 203),     // #bec3cb

    accent_primary: Color::Rgb(191, 219, 254),   // #bfdbfe
    accent_secondary: Color::Rgb(221, 214, 254), // #ddd6fe

    success: Color::Rgb(134, 239, 172), // #86efac
    warning: Color::Rgb(253, 224, 71),  // #fde047
    error: Color::Rgb(252, 165, 165),   // #fca5a5
    info: Color::Rgb(165, 243, 252),    // #a5f3fc

    verse_number: Color::Rgb(191, 219, 254), // #bfdbfe
    highlight_bg: Color::Rgb(202, 138, 4),   // #ca8a04
    highlight_fg: Color::Rgb(255, 255, 255), // #ffffff

    border: Color::Rgb(107, 114, 128),         // #6b7280
    border_focused: Color::Rgb(191, 219, 254), // #bfdbfe
    selection: Color::Rgb(55, 65, 81),         // #374151
    cursor: Color::Rgb(255, 255, 255),         // #ffffff
};
