//! Content stream operators
//!
//! [`OpCode`] enumerates every operator keyword defined for content streams
//! (ISO 32000-1 Annex A). [`dispatch`] maps a raw keyword span to its code,
//! returning how many trailing bytes belong to the next token when two
//! keywords were written without a separator.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Operator codes
///
/// Case-sensitive keyword pairs such as `q`/`Q` use a doubled letter for the
/// lowercase form (`Qq` is `q`, `Q` is `Q`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpCode {
    // General graphics state
    /// `q`
    Qq,
    /// `Q`
    Q,
    /// `cm`
    Cm,
    /// `w`
    Ww,
    /// `J`
    J,
    /// `j`
    Jj,
    /// `M`
    M,
    /// `d`
    D,
    /// `ri`
    Ri,
    /// `i`
    I,
    /// `gs`
    Gs,

    // Path construction
    /// `m`
    Mm,
    /// `l`
    L,
    /// `c`
    C,
    /// `v`
    V,
    /// `y`
    Y,
    /// `h`
    H,
    /// `re`
    Re,

    // Path painting
    /// `S`
    S,
    /// `s`
    Ss,
    /// `f`
    Ff,
    /// `F` (obsolete synonym for `f`)
    F,
    /// `f*`
    FStar,
    /// `B`
    B,
    /// `B*`
    BStar,
    /// `b`
    Bb,
    /// `b*`
    BbStar,
    /// `n`
    N,

    // Clipping
    /// `W`
    W,
    /// `W*`
    WStar,

    // Text objects
    BT,
    ET,

    // Text state
    Tc,
    Tw,
    Tz,
    TL,
    Tf,
    Tr,
    Ts,

    // Text positioning
    Td,
    TD,
    Tm,
    /// `T*`
    TStar,

    // Text showing
    Tj,
    TJ,
    /// `'`
    Quote,
    /// `"`
    DoubleQuote,

    // Type 3 fonts
    /// `d0`
    D0,
    /// `d1`
    D1,

    // Color
    CS,
    /// `cs`
    Cs,
    SC,
    SCN,
    /// `sc`
    Sc,
    /// `scn`
    Scn,
    G,
    /// `g`
    Gg,
    RG,
    /// `rg`
    Rg,
    K,
    /// `k`
    Kk,

    // Shading
    /// `sh`
    Sh,

    // Inline images
    BI,
    ID,
    EI,

    // XObjects
    Do,

    // Marked content
    MP,
    DP,
    BMC,
    BDC,
    EMC,

    // Compatibility
    BX,
    EX,

    /// `%`
    Comment,

    /// Unrecognized keyword
    NoOp,
}

/// Operator groups, following the categories of ISO 32000-1 Table 51
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorCategory {
    GeneralGraphicsState,
    SpecialGraphicsState,
    PathConstruction,
    PathPainting,
    ClippingPaths,
    TextObjects,
    TextState,
    TextPositioning,
    TextShowing,
    Type3Fonts,
    Color,
    ShadingPatterns,
    InlineImages,
    XObjects,
    MarkedContent,
    Compatibility,
    Comment,
    Unknown,
}

impl OpCode {
    /// Every recognized operator, excluding [`OpCode::NoOp`]
    pub const ALL: &'static [OpCode] = &[
        OpCode::Qq,
        OpCode::Q,
        OpCode::Cm,
        OpCode::Ww,
        OpCode::J,
        OpCode::Jj,
        OpCode::M,
        OpCode::D,
        OpCode::Ri,
        OpCode::I,
        OpCode::Gs,
        OpCode::Mm,
        OpCode::L,
        OpCode::C,
        OpCode::V,
        OpCode::Y,
        OpCode::H,
        OpCode::Re,
        OpCode::S,
        OpCode::Ss,
        OpCode::Ff,
        OpCode::F,
        OpCode::FStar,
        OpCode::B,
        OpCode::BStar,
        OpCode::Bb,
        OpCode::BbStar,
        OpCode::N,
        OpCode::W,
        OpCode::WStar,
        OpCode::BT,
        OpCode::ET,
        OpCode::Tc,
        OpCode::Tw,
        OpCode::Tz,
        OpCode::TL,
        OpCode::Tf,
        OpCode::Tr,
        OpCode::Ts,
        OpCode::Td,
        OpCode::TD,
        OpCode::Tm,
        OpCode::TStar,
        OpCode::Tj,
        OpCode::TJ,
        OpCode::Quote,
        OpCode::DoubleQuote,
        OpCode::D0,
        OpCode::D1,
        OpCode::CS,
        OpCode::Cs,
        OpCode::SC,
        OpCode::SCN,
        OpCode::Sc,
        OpCode::Scn,
        OpCode::G,
        OpCode::Gg,
        OpCode::RG,
        OpCode::Rg,
        OpCode::K,
        OpCode::Kk,
        OpCode::Sh,
        OpCode::BI,
        OpCode::ID,
        OpCode::EI,
        OpCode::Do,
        OpCode::MP,
        OpCode::DP,
        OpCode::BMC,
        OpCode::BDC,
        OpCode::EMC,
        OpCode::BX,
        OpCode::EX,
        OpCode::Comment,
    ];

    /// Canonical keyword as it appears in a content stream
    pub fn keyword(self) -> &'static str {
        match self {
            OpCode::Qq => "q",
            OpCode::Q => "Q",
            OpCode::Cm => "cm",
            OpCode::Ww => "w",
            OpCode::J => "J",
            OpCode::Jj => "j",
            OpCode::M => "M",
            OpCode::D => "d",
            OpCode::Ri => "ri",
            OpCode::I => "i",
            OpCode::Gs => "gs",
            OpCode::Mm => "m",
            OpCode::L => "l",
            OpCode::C => "c",
            OpCode::V => "v",
            OpCode::Y => "y",
            OpCode::H => "h",
            OpCode::Re => "re",
            OpCode::S => "S",
            OpCode::Ss => "s",
            OpCode::Ff => "f",
            OpCode::F => "F",
            OpCode::FStar => "f*",
            OpCode::B => "B",
            OpCode::BStar => "B*",
            OpCode::Bb => "b",
            OpCode::BbStar => "b*",
            OpCode::N => "n",
            OpCode::W => "W",
            OpCode::WStar => "W*",
            OpCode::BT => "BT",
            OpCode::ET => "ET",
            OpCode::Tc => "Tc",
            OpCode::Tw => "Tw",
            OpCode::Tz => "Tz",
            OpCode::TL => "TL",
            OpCode::Tf => "Tf",
            OpCode::Tr => "Tr",
            OpCode::Ts => "Ts",
            OpCode::Td => "Td",
            OpCode::TD => "TD",
            OpCode::Tm => "Tm",
            OpCode::TStar => "T*",
            OpCode::Tj => "Tj",
            OpCode::TJ => "TJ",
            OpCode::Quote => "'",
            OpCode::DoubleQuote => "\"",
            OpCode::D0 => "d0",
            OpCode::D1 => "d1",
            OpCode::CS => "CS",
            OpCode::Cs => "cs",
            OpCode::SC => "SC",
            OpCode::SCN => "SCN",
            OpCode::Sc => "sc",
            OpCode::Scn => "scn",
            OpCode::G => "G",
            OpCode::Gg => "g",
            OpCode::RG => "RG",
            OpCode::Rg => "rg",
            OpCode::K => "K",
            OpCode::Kk => "k",
            OpCode::Sh => "sh",
            OpCode::BI => "BI",
            OpCode::ID => "ID",
            OpCode::EI => "EI",
            OpCode::Do => "Do",
            OpCode::MP => "MP",
            OpCode::DP => "DP",
            OpCode::BMC => "BMC",
            OpCode::BDC => "BDC",
            OpCode::EMC => "EMC",
            OpCode::BX => "BX",
            OpCode::EX => "EX",
            OpCode::Comment => "%",
            OpCode::NoOp => "",
        }
    }

    /// Exact keyword lookup; unlike [`dispatch`] no prefix matching is done
    pub fn from_keyword(keyword: &[u8]) -> Option<OpCode> {
        KEYWORDS.get(keyword).copied()
    }

    pub fn category(self) -> OperatorCategory {
        use OperatorCategory::*;
        match self {
            OpCode::Ww
            | OpCode::J
            | OpCode::Jj
            | OpCode::M
            | OpCode::D
            | OpCode::Ri
            | OpCode::I
            | OpCode::Gs => GeneralGraphicsState,
            OpCode::Qq | OpCode::Q | OpCode::Cm => SpecialGraphicsState,
            OpCode::Mm | OpCode::L | OpCode::C | OpCode::V | OpCode::Y | OpCode::H | OpCode::Re => {
                PathConstruction
            }
            OpCode::S
            | OpCode::Ss
            | OpCode::Ff
            | OpCode::F
            | OpCode::FStar
            | OpCode::B
            | OpCode::BStar
            | OpCode::Bb
            | OpCode::BbStar
            | OpCode::N => PathPainting,
            OpCode::W | OpCode::WStar => ClippingPaths,
            OpCode::BT | OpCode::ET => TextObjects,
            OpCode::Tc
            | OpCode::Tw
            | OpCode::Tz
            | OpCode::TL
            | OpCode::Tf
            | OpCode::Tr
            | OpCode::Ts => TextState,
            OpCode::Td | OpCode::TD | OpCode::Tm | OpCode::TStar => TextPositioning,
            OpCode::Tj | OpCode::TJ | OpCode::Quote | OpCode::DoubleQuote => TextShowing,
            OpCode::D0 | OpCode::D1 => Type3Fonts,
            OpCode::CS
            | OpCode::Cs
            | OpCode::SC
            | OpCode::SCN
            | OpCode::Sc
            | OpCode::Scn
            | OpCode::G
            | OpCode::Gg
            | OpCode::RG
            | OpCode::Rg
            | OpCode::K
            | OpCode::Kk => Color,
            OpCode::Sh => ShadingPatterns,
            OpCode::BI | OpCode::ID | OpCode::EI => InlineImages,
            OpCode::Do => XObjects,
            OpCode::MP | OpCode::DP | OpCode::BMC | OpCode::BDC | OpCode::EMC => MarkedContent,
            OpCode::BX | OpCode::EX => Compatibility,
            OpCode::Comment => Comment,
            OpCode::NoOp => Unknown,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpCode::NoOp => write!(f, "<noop>"),
            op => f.write_str(op.keyword()),
        }
    }
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static [u8], OpCode> = OpCode::ALL
        .iter()
        .map(|&op| (op.keyword().as_bytes(), op))
        .collect();
}

/// Resolve a keyword span to its operator and backoff
///
/// The span is everything the lexer read up to the next whitespace or
/// delimiter. The longest canonical keyword that prefixes it wins, and the
/// returned backoff is the number of trailing bytes that belong to the next
/// token: `ref` resolves to `(Re, 1)` leaving `f` to be read again.
/// Unknown spans resolve to `(NoOp, 0)`.
pub fn dispatch(span: &[u8]) -> (OpCode, usize) {
    // The null object is not a keyword; keep it from decaying into `n`
    if span == b"null" {
        return (OpCode::NoOp, 0);
    }

    let op = match span {
        [b'b', b'*', ..] => OpCode::BbStar,
        [b'b', ..] => OpCode::Bb,
        [b'B', b'D', b'C', ..] => OpCode::BDC,
        [b'B', b'M', b'C', ..] => OpCode::BMC,
        [b'B', b'I', ..] => OpCode::BI,
        [b'B', b'T', ..] => OpCode::BT,
        [b'B', b'X', ..] => OpCode::BX,
        [b'B', b'*', ..] => OpCode::BStar,
        [b'B', ..] => OpCode::B,

        [b'c', b'm', ..] => OpCode::Cm,
        [b'c', b's', ..] => OpCode::Cs,
        [b'c', ..] => OpCode::C,
        [b'C', b'S', ..] => OpCode::CS,

        [b'd', b'0', ..] => OpCode::D0,
        [b'd', b'1', ..] => OpCode::D1,
        [b'd', ..] => OpCode::D,
        [b'D', b'o', ..] => OpCode::Do,
        [b'D', b'P', ..] => OpCode::DP,

        [b'E', b'I', ..] => OpCode::EI,
        [b'E', b'M', b'C', ..] => OpCode::EMC,
        [b'E', b'T', ..] => OpCode::ET,
        [b'E', b'X', ..] => OpCode::EX,

        [b'f', b'*', ..] => OpCode::FStar,
        [b'f', ..] => OpCode::Ff,
        [b'F', ..] => OpCode::F,

        [b'g', b's', ..] => OpCode::Gs,
        [b'g', ..] => OpCode::Gg,
        [b'G', ..] => OpCode::G,

        [b'h', ..] => OpCode::H,
        [b'i', ..] => OpCode::I,
        [b'I', b'D', ..] => OpCode::ID,
        [b'j', ..] => OpCode::Jj,
        [b'J', ..] => OpCode::J,
        [b'k', ..] => OpCode::Kk,
        [b'K', ..] => OpCode::K,
        [b'l', ..] => OpCode::L,

        [b'm', ..] => OpCode::Mm,
        [b'M', b'P', ..] => OpCode::MP,
        [b'M', ..] => OpCode::M,

        [b'n', ..] => OpCode::N,
        [b'q', ..] => OpCode::Qq,
        [b'Q', ..] => OpCode::Q,

        [b'r', b'e', ..] => OpCode::Re,
        [b'r', b'g', ..] => OpCode::Rg,
        [b'r', b'i', ..] => OpCode::Ri,
        [b'R', b'G', ..] => OpCode::RG,

        [b's', b'c', b'n', ..] => OpCode::Scn,
        [b's', b'c', ..] => OpCode::Sc,
        [b's', b'h', ..] => OpCode::Sh,
        [b's', ..] => OpCode::Ss,
        [b'S', b'C', b'N', ..] => OpCode::SCN,
        [b'S', b'C', ..] => OpCode::SC,
        [b'S', ..] => OpCode::S,

        [b'T', b'*', ..] => OpCode::TStar,
        [b'T', b'c', ..] => OpCode::Tc,
        [b'T', b'd', ..] => OpCode::Td,
        [b'T', b'D', ..] => OpCode::TD,
        [b'T', b'f', ..] => OpCode::Tf,
        [b'T', b'j', ..] => OpCode::Tj,
        [b'T', b'J', ..] => OpCode::TJ,
        [b'T', b'L', ..] => OpCode::TL,
        [b'T', b'm', ..] => OpCode::Tm,
        [b'T', b'r', ..] => OpCode::Tr,
        [b'T', b's', ..] => OpCode::Ts,
        [b'T', b'w', ..] => OpCode::Tw,
        [b'T', b'z', ..] => OpCode::Tz,

        [b'v', ..] => OpCode::V,
        [b'w', ..] => OpCode::Ww,
        [b'W', b'*', ..] => OpCode::WStar,
        [b'W', ..] => OpCode::W,
        [b'y', ..] => OpCode::Y,

        [b'\'', ..] => OpCode::Quote,
        [b'"', ..] => OpCode::DoubleQuote,
        [b'%', ..] => OpCode::Comment,

        _ => return (OpCode::NoOp, 0),
    };

    (op, span.len().saturating_sub(op.keyword().len()))
}
