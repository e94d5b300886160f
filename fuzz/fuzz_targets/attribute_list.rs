#![no_main]

use libfuzzer_sys::fuzz_target;
use yoti_receipt::attribute::decode_attribute_list;

fuzz_target!(|data: &[u8]| {
    if let Ok(attributes) = decode_attribute_list(data) {
        for attribute in &attributes {
            let _ = attribute.value();
            let _ = attribute.sources();
        }
    }
});
