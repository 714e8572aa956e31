use adcq_core::config::config::Settings;
use adcq_core::config::defaults::default_settings;
use adcq_core::config::format::{decode, encode, settings_id_hex};
use adcq_core::signal::sample::SamplerParams;
use adcq_core::QuantConfig;

#[test]
fn degenerate_settings_survive_a_save() {
    let s = Settings {
        quant: QuantConfig::new(5.0, 5.0, 8),
        analog_voltage: -3.25,
        sampler: SamplerParams {
            sample_rate: 44_100,
            duration_s: 0.02,
            frequency_hz: 440.0,
        },
        ..default_settings()
    };
    assert_eq!(decode(&encode(&s)).unwrap(), s);
}

#[test]
fn id_is_stable_and_sensitive() {
    let a = default_settings();
    let id = settings_id_hex(&a);
    assert_eq!(id.len(), 32);
    assert_eq!(id, settings_id_hex(&default_settings()));

    let mut b = a;
    b.quant.bit_depth = 9;
    assert_ne!(id, settings_id_hex(&b));
}

#[test]
fn rejects_foreign_bytes() {
    assert!(decode(b"K8R1....").is_err());
    assert!(decode(&[]).is_err());

    let mut short = encode(&default_settings());
    short.truncate(20);
    assert!(decode(&short).is_err());
}
