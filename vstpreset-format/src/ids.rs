//! Known VST3 class identifiers and the payload grammar registry.
//!
//! The identifiers are pure data, collected from reverse-engineered preset
//! files. Adding support for a new plugin means adding a constant here and
//! registering it against a [`PayloadKind`]; nothing else changes.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::payload::PayloadKind;

// Steinberg
pub const STEINBERG_AMP_SIMULATOR: &str = "E4B91D8420B74C48A8B10F2DB9CB707E";
pub const STEINBERG_AUTO_PAN: &str = "1CA6E894E4624F73ADEB29CD01DDE9EE";
pub const STEINBERG_BRICKWALL_LIMITER: &str = "94DEB7BF378041EE9E2FEDA24E19EF60";
pub const STEINBERG_COMPRESSOR: &str = "5B38F28281144FFE80285FF7CCF20483";
pub const STEINBERG_DE_ESSER: &str = "75FD13A528D24880982197D541BC582A";
pub const STEINBERG_DE_ESSER_NEW: &str = "464DF4539C164C03869900DF86BD887F";
pub const STEINBERG_DISTORTION: &str = "A990C1062CDE43839ECEF8FE91743DA5";
pub const STEINBERG_DJ_EQ: &str = "B023870608424FABBCF5516BB15FF0EE";
pub const STEINBERG_DUAL_FILTER: &str = "6143DAECD6184AE2A570FE9F35065E24";
pub const STEINBERG_ENVELOPE_SHAPER: &str = "C3D60417A5BB4FB288CB1A75FA641EDF";
pub const STEINBERG_EQ: &str = "297BA567D83144E1AE921DEF07B41156";
pub const STEINBERG_EXPANDER: &str = "2A4C06FF24F14078868891D184CEFB73";
pub const STEINBERG_FREQUENCY: &str = "01F6CCC94CAE4668B7C6EC85E681E419";
pub const STEINBERG_GATE: &str = "3B660266B3CA4B57BBD487AE1E6C0D2A";
pub const STEINBERG_GEQ10: &str = "7C215D9E31E2419E9925056D19310ACD";
pub const STEINBERG_GROOVE_AGENT_ONE: &str = "D3F57B09EC6B49998C534F50787A9F86";
pub const STEINBERG_GROOVE_AGENT_SE: &str = "91585860BA1748E581441ECD96B153ED";
pub const STEINBERG_HALION_SONIC_SE: &str = "5B6D6402C5F74C35B3BE88ADF7FC7D27";
pub const STEINBERG_LIMITER: &str = "B94789B3C4C944EFB0058694DAB8704E";
pub const STEINBERG_MAGNETO_II: &str = "B8874B5BFF884A93A524C74D7FFB1D54";
pub const STEINBERG_MAXIMIZER: &str = "44A0C349905B45D0B97C72D2C6F5B565";
pub const STEINBERG_MOD_MACHINE: &str = "27994C1910A04BA991A20C402B922E35";
pub const STEINBERG_MONO_DELAY: &str = "42A36F8AEE394B98BB2E8B63CB68E3E7";
pub const STEINBERG_MORPH_FILTER: &str = "25B0872DB12B44B89E32ABBC1D0B3D8A";
pub const STEINBERG_MULTIBAND_COMPRESSOR: &str = "86DFC3F5415C40388D3AA69030C380B1";
pub const STEINBERG_MULTIBAND_ENVELOPE_SHAPER: &str = "F7E6BFADFCD947BEB0A726EF32CBFC70";
pub const STEINBERG_NOISE_GATE: &str = "C3B0615A2A444991B423673DEE2379A7";
pub const STEINBERG_OCTAVER: &str = "4114D8E30C024C1DB0DE375FC53CDBED";
pub const STEINBERG_PAD_SHOP: &str = "F38B6C9C04CC45C8B98A682A6F45424A";
pub const STEINBERG_PING_PONG_DELAY: &str = "37A3AA84E3A24D069C39030EC68768E1";
pub const STEINBERG_PITCH_CORRECT: &str = "10F9FE4142694F1EAC21E294B42577C6";
pub const STEINBERG_PROLOGUE: &str = "FFF583CCDFB246F894308DB9C5D94C8D";
pub const STEINBERG_REVERENCE: &str = "ED824AB48E0846D5959682F5626D0972";
pub const STEINBERG_SAMPLER_TRACK: &str = "D1B42E80F1124DFEAFEDE2480EFB4298";
pub const STEINBERG_STANDARD_PANNER: &str = "44E1149EDB3E4387BDD827FEA3A39EE7";
pub const STEINBERG_STEREO_DELAY: &str = "001DCD3345D14A13B59DAECF75A37536";
pub const STEINBERG_STEREO_ENHANCER: &str = "77BBA7CA90F14C9BB298BA9010D6DD78";
pub const STEINBERG_STUDIO_CHORUS: &str = "8545543739404DEB84F4E6CF0DC687B5";
pub const STEINBERG_STUDIO_EQ: &str = "946051208E29496E804F64A825C8A047";
pub const STEINBERG_TREMOLO: &str = "E97A6873690F40E986F3EE1007B5C8FC";
pub const STEINBERG_TUNER: &str = "6B9B08D2CA294270BF092A62865521BF";
pub const STEINBERG_UV22HR: &str = "56535455564852757632326872000000";
pub const STEINBERG_VST_AMP_RACK: &str = "04F35DB10F0C47B9965EA7D63B0CCE67";

// Waves
pub const WAVES_API2500_MONO: &str = "5653544150434D6170692D3235303020";
pub const WAVES_BASS_RIDER_STEREO: &str = "56535442534C53626173732072696465";
pub const WAVES_C1_COMP_STEREO: &str = "565354434D5053633120636F6D702073";
pub const WAVES_C4_STEREO: &str = "5653544445515363342073746572656F";
pub const WAVES_CLA_GUITARS_STEREO: &str = "56535443475453636C61206775697461";
pub const WAVES_DE_BREATH_MONO: &str = "5653544252544D646562726561746820";
pub const WAVES_DE_ESSER_STEREO: &str = "56535444534153646565737365722073";
pub const WAVES_DOUBLER2_STEREO: &str = "56535457443253646F75626C65723220";
pub const WAVES_DOUBLER4_STEREO: &str = "56535457443453646F75626C65723420";
pub const WAVES_H_DELAY_STEREO: &str = "56535448424453682D64656C61792073";
pub const WAVES_KRAMER_TAPE_STEREO: &str = "565354544150536B72616D6572207461";
pub const WAVES_L3_LL_MULTI_STEREO: &str = "565354523350536C332D6C6C206D756C";
pub const WAVES_L3_MULTI_MAXIMIZER_STEREO: &str = "5653544C3350536C33206D756C74696D";
pub const WAVES_LIN_EQ_LOWBAND_STEREO: &str = "5653544C5153536C696E6571206C6F77";
pub const WAVES_MANNY_M_REVERB_STEREO: &str = "5653544D4D52536D616E6E796D207265";
pub const WAVES_MASERATI_ACG_STEREO: &str = "565354544E41536D6173657261746920";
pub const WAVES_MASERATI_VX1_STEREO: &str = "565354544E56536D6173657261746920";
pub const WAVES_META_FLANGER_STEREO: &str = "565354464C4E536D657461666C616E67";
pub const WAVES_ONE_KNOB_FILTER_STEREO: &str = "565354525346536F6E656B6E6F622066";
pub const WAVES_PUIG_CHILD_670_STEREO: &str = "56535446434853707569676368696C64";
pub const WAVES_PUIG_TEC_EQP1A_STEREO: &str = "56535450314153707569677465632065";
pub const WAVES_Q10_STEREO: &str = "56535445514153713130207374657265";
pub const WAVES_Q2_STEREO: &str = "5653544551325371322073746572656F";
pub const WAVES_R_BASS_STEREO: &str = "565354524E4253726261737320737465";
pub const WAVES_R_CHANNEL_STEREO: &str = "565354524E5453726368616E6E656C20";
pub const WAVES_R_COMPRESSOR_STEREO: &str = "5653545552435372636F6D7072657373";
pub const WAVES_R_DE_ESSER_STEREO: &str = "56535452445353726465657373657220";
pub const WAVES_REQ6_STEREO: &str = "56535452513653726571203620737465";
pub const WAVES_R_VERB_STEREO: &str = "56535452524653727665726220737465";
pub const WAVES_S1_IMAGER_STEREO: &str = "5653544E534853733120696D61676572";
pub const WAVES_SSL_CHANNEL_STEREO: &str = "5653545343485373736C6368616E6E65";
pub const WAVES_SSL_COMP_STEREO: &str = "565354534C435373736C636F6D702073";
pub const WAVES_SSL_EQ_MONO: &str = "565354534C514D73736C6571206D6F6E";
pub const WAVES_SSL_EQ_STEREO: &str = "565354534C515373736C657120737465";
pub const WAVES_SUPER_TAP_2TAPS_MONO_STEREO: &str = "5653544D543258737570657274617020";
pub const WAVES_SUPER_TAP_2TAPS_STEREO: &str = "5653544D543253737570657274617020";
pub const WAVES_TRUE_VERB_STEREO: &str = "56535454563453747275657665726220";
pub const WAVES_TUNE_LT_STEREO: &str = "565354544E4C5377617665732074756E";
pub const WAVES_VITAMIN_STEREO: &str = "56535456544D53766974616D696E2073";
pub const WAVES_VOCAL_RIDER_STEREO: &str = "56535452445253766F63616C20726964";

// UAD
pub const UAD_SSL_E_CHANNEL: &str = "5653544A3941557561642073736C2065";

// Native Instruments
pub const NI_KONTAKT5: &str = "5653544E694F356B6F6E74616B742035";
pub const NI_KONTAKT6: &str = "5653544E694F356B6F6E74616B740000";
pub const NI_KONTAKT6_64OUT: &str = "5653544E6924446B6F6E74616B740000";

// FabFilter
pub const FABFILTER_PRO_Q: &str = "E45D59E8CB2540FAB0F346E115F8AFD4";
pub const FABFILTER_PRO_Q_X64: &str = "5653544650517266616266696C746572";
pub const FABFILTER_PRO_Q2: &str = "55FD08E6C00B44A697DA68F61C6FD576";
pub const FABFILTER_PRO_Q2_X64: &str = "5653544651327066616266696C746572";

// East West
pub const EAST_WEST_PLAY: &str = "ABCDEF019182FAEB2D45572D4577506C";
pub const EAST_WEST_PLAY_X64: &str = "565354706C6179706C61795F7673745F";

// MusicLab
pub const MUSIC_LAB_REAL_STRAT: &str = "5653544D526C537265616C7374726174";
pub const MUSIC_LAB_REAL_EIGHT: &str = "5653544D526C457265616C6569676874";
pub const MUSIC_LAB_REAL_GUITAR_CLASSIC: &str = "5653544D526C477265616C6775697461";
pub const MUSIC_LAB_REAL_LPC: &str = "565354524C50437265616C6C70630000";

// Other
pub const TB_PRO_AUDIO_GAIN_RIDER2: &str = "F2AEE70D00DE4F4E5442504154425044";

/// The simple one-parameter-block effects sharing the 140-byte record layout.
const PARAMETER_BLOCK_IDS: &[&str] = &[
    STEINBERG_AMP_SIMULATOR,
    STEINBERG_AUTO_PAN,
    STEINBERG_BRICKWALL_LIMITER,
    STEINBERG_COMPRESSOR,
    STEINBERG_DE_ESSER,
    STEINBERG_DE_ESSER_NEW,
    STEINBERG_DISTORTION,
    STEINBERG_DJ_EQ,
    STEINBERG_DUAL_FILTER,
    STEINBERG_ENVELOPE_SHAPER,
    STEINBERG_EQ,
    STEINBERG_EXPANDER,
    STEINBERG_FREQUENCY,
    STEINBERG_GATE,
    STEINBERG_GEQ10,
    STEINBERG_LIMITER,
    STEINBERG_MAGNETO_II,
    STEINBERG_MAXIMIZER,
    STEINBERG_MOD_MACHINE,
    STEINBERG_MONO_DELAY,
    STEINBERG_MORPH_FILTER,
    STEINBERG_MULTIBAND_COMPRESSOR,
    STEINBERG_MULTIBAND_ENVELOPE_SHAPER,
    STEINBERG_NOISE_GATE,
    STEINBERG_OCTAVER,
    STEINBERG_PING_PONG_DELAY,
    STEINBERG_PITCH_CORRECT,
    STEINBERG_STEREO_DELAY,
    STEINBERG_STEREO_ENHANCER,
    STEINBERG_STUDIO_CHORUS,
    STEINBERG_STUDIO_EQ,
    STEINBERG_TREMOLO,
    STEINBERG_TUNER,
    STEINBERG_UV22HR,
];

/// Samplers and synths whose state is only ever carried verbatim.
const OPAQUE_IDS: &[&str] = &[
    STEINBERG_GROOVE_AGENT_SE,
    STEINBERG_HALION_SONIC_SE,
    STEINBERG_PAD_SHOP,
    STEINBERG_PROLOGUE,
    STEINBERG_SAMPLER_TRACK,
    STEINBERG_VST_AMP_RACK,
    EAST_WEST_PLAY,
    EAST_WEST_PLAY_X64,
    MUSIC_LAB_REAL_EIGHT,
    MUSIC_LAB_REAL_GUITAR_CLASSIC,
    MUSIC_LAB_REAL_LPC,
    MUSIC_LAB_REAL_STRAT,
];

const VENDOR_XML_IDS: &[&str] = &[
    WAVES_API2500_MONO,
    WAVES_BASS_RIDER_STEREO,
    WAVES_C1_COMP_STEREO,
    WAVES_C4_STEREO,
    WAVES_CLA_GUITARS_STEREO,
    WAVES_DE_BREATH_MONO,
    WAVES_DE_ESSER_STEREO,
    WAVES_DOUBLER2_STEREO,
    WAVES_DOUBLER4_STEREO,
    WAVES_H_DELAY_STEREO,
    WAVES_KRAMER_TAPE_STEREO,
    WAVES_L3_LL_MULTI_STEREO,
    WAVES_L3_MULTI_MAXIMIZER_STEREO,
    WAVES_LIN_EQ_LOWBAND_STEREO,
    WAVES_MANNY_M_REVERB_STEREO,
    WAVES_MASERATI_ACG_STEREO,
    WAVES_MASERATI_VX1_STEREO,
    WAVES_META_FLANGER_STEREO,
    WAVES_ONE_KNOB_FILTER_STEREO,
    WAVES_PUIG_CHILD_670_STEREO,
    WAVES_PUIG_TEC_EQP1A_STEREO,
    WAVES_Q10_STEREO,
    WAVES_Q2_STEREO,
    WAVES_R_BASS_STEREO,
    WAVES_R_CHANNEL_STEREO,
    WAVES_R_COMPRESSOR_STEREO,
    WAVES_R_DE_ESSER_STEREO,
    WAVES_REQ6_STEREO,
    WAVES_R_VERB_STEREO,
    WAVES_S1_IMAGER_STEREO,
    WAVES_SSL_CHANNEL_STEREO,
    WAVES_SSL_COMP_STEREO,
    WAVES_SSL_EQ_MONO,
    WAVES_SSL_EQ_STEREO,
    WAVES_SUPER_TAP_2TAPS_MONO_STEREO,
    WAVES_SUPER_TAP_2TAPS_STEREO,
    WAVES_TRUE_VERB_STEREO,
    WAVES_TUNE_LT_STEREO,
    WAVES_VITAMIN_STEREO,
    WAVES_VOCAL_RIDER_STEREO,
];

/// Identifier to grammar mapping, built once. Identifiers not present here
/// fall back to [`PayloadKind::Opaque`] at lookup time.
pub(crate) static REGISTRY: LazyLock<HashMap<&'static str, PayloadKind>> = LazyLock::new(|| {
    let mut registry = HashMap::new();
    for id in PARAMETER_BLOCK_IDS {
        registry.insert(*id, PayloadKind::ParameterBlock);
    }
    for id in OPAQUE_IDS {
        registry.insert(*id, PayloadKind::Opaque);
    }
    for id in VENDOR_XML_IDS {
        registry.insert(*id, PayloadKind::VendorXml);
    }
    registry.insert(STEINBERG_GROOVE_AGENT_ONE, PayloadKind::RawXml);
    registry.insert(STEINBERG_REVERENCE, PayloadKind::Reverence);
    registry.insert(STEINBERG_STANDARD_PANNER, PayloadKind::Panner);
    registry.insert(NI_KONTAKT5, PayloadKind::Kontakt);
    registry
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_the_known_families() {
        assert_eq!(
            REGISTRY.get(STEINBERG_COMPRESSOR),
            Some(&PayloadKind::ParameterBlock)
        );
        assert_eq!(
            REGISTRY.get(WAVES_SSL_COMP_STEREO),
            Some(&PayloadKind::VendorXml)
        );
        assert_eq!(REGISTRY.get(NI_KONTAKT5), Some(&PayloadKind::Kontakt));
        // declared but deliberately unregistered; routes to the fallback
        assert_eq!(REGISTRY.get(UAD_SSL_E_CHANNEL), None);
    }

    #[test]
    fn identifiers_are_all_32_chars() {
        for id in PARAMETER_BLOCK_IDS
            .iter()
            .chain(OPAQUE_IDS)
            .chain(VENDOR_XML_IDS)
        {
            assert_eq!(id.len(), 32, "{id}");
        }
    }
}
