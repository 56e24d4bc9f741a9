//! Modifier masks and key combinations.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Modifier keys held together with a hotkey.
    ///
    /// Values are the Win32 `MOD_*` constants so the mask can be handed to
    /// `RegisterHotKey` unchanged.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const ALT = 0x0001;
        const CONTROL = 0x0002;
        const SHIFT = 0x0004;
        const WIN = 0x0008;
        /// Don't repeat the notification while the combination is held.
        const NOREPEAT = 0x4000;
    }
}

/// Unknown modifier name in a `"ctrl+shift"` style string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown modifier {0:?} (expected ctrl, alt, shift, win or none)")]
pub struct ParseModifiersError(pub String);

impl FromStr for Modifiers {
    type Err = ParseModifiersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(Modifiers::empty());
        }

        let mut mods = Modifiers::empty();
        for token in s.split('+') {
            let token = token.trim().to_ascii_lowercase();
            mods |= match token.as_str() {
                "ctrl" | "control" => Modifiers::CONTROL,
                "alt" => Modifiers::ALT,
                "shift" => Modifiers::SHIFT,
                "win" | "super" | "meta" | "cmd" => Modifiers::WIN,
                "norepeat" => Modifiers::NOREPEAT,
                _ => return Err(ParseModifiersError(token)),
            };
        }
        Ok(mods)
    }
}

impl fmt::Display for Modifiers {
    /// `Ctrl+Alt+Shift+Win` order; NOREPEAT is not a key and is skipped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Modifiers::CONTROL, "Ctrl"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::WIN, "Win"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A modifier mask plus a virtual key code, e.g. Ctrl+1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub modifiers: Modifiers,
    pub virtual_key: u32,
}

impl KeyCombo {
    pub fn new(modifiers: Modifiers, virtual_key: u32) -> Self {
        Self {
            modifiers,
            virtual_key,
        }
    }

    /// The combination as the OS compares it (NOREPEAT doesn't count).
    pub fn normalized(self) -> Self {
        Self::new(self.modifiers - Modifiers::NOREPEAT, self.virtual_key)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mods = self.modifiers.to_string();
        if !mods.is_empty() {
            write!(f, "{}+", mods)?;
        }
        match self.virtual_key {
            // Digits and letters share their ASCII codes
            vk @ (0x30..=0x39 | 0x41..=0x5A) => write!(f, "{}", vk as u8 as char),
            vk @ 0x70..=0x87 => write!(f, "F{}", vk - 0x6F),
            vk => write!(f, "VK 0x{:02X}", vk),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_combined_modifiers() {
        let mods: Modifiers = "Ctrl + shift".parse().unwrap();
        assert_eq!(mods, Modifiers::CONTROL | Modifiers::SHIFT);
    }

    #[test]
    fn parses_aliases() {
        assert_eq!("control".parse::<Modifiers>().unwrap(), Modifiers::CONTROL);
        assert_eq!("super".parse::<Modifiers>().unwrap(), Modifiers::WIN);
        assert_eq!("none".parse::<Modifiers>().unwrap(), Modifiers::empty());
        assert_eq!("".parse::<Modifiers>().unwrap(), Modifiers::empty());
    }

    #[test]
    fn rejects_unknown_modifier() {
        let err = "ctrl+hyper".parse::<Modifiers>().unwrap_err();
        assert_eq!(err, ParseModifiersError("hyper".to_string()));
        assert!("ctrl+".parse::<Modifiers>().is_err());
    }

    #[test]
    fn masks_match_win32_values() {
        assert_eq!(Modifiers::ALT.bits(), 0x0001);
        assert_eq!(Modifiers::CONTROL.bits(), 0x0002);
        assert_eq!(Modifiers::SHIFT.bits(), 0x0004);
        assert_eq!(Modifiers::WIN.bits(), 0x0008);
        assert_eq!(Modifiers::NOREPEAT.bits(), 0x4000);
    }

    #[test]
    fn displays_in_fixed_order_without_norepeat() {
        let mods = Modifiers::SHIFT | Modifiers::CONTROL | Modifiers::NOREPEAT;
        assert_eq!(mods.to_string(), "Ctrl+Shift");
    }

    #[test]
    fn combo_labels() {
        assert_eq!(KeyCombo::new(Modifiers::CONTROL, 0x31).to_string(), "Ctrl+1");
        assert_eq!(KeyCombo::new(Modifiers::ALT, 0x41).to_string(), "Alt+A");
        assert_eq!(KeyCombo::new(Modifiers::empty(), 0x70).to_string(), "F1");
        assert_eq!(KeyCombo::new(Modifiers::WIN, 0x20).to_string(), "Win+VK 0x20");
    }

    #[test]
    fn normalized_drops_norepeat() {
        let combo = KeyCombo::new(Modifiers::CONTROL | Modifiers::NOREPEAT, 0x31);
        assert_eq!(combo.normalized(), KeyCombo::new(Modifiers::CONTROL, 0x31));
    }
}
