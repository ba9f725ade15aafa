use crate::ser::{Serializer, ToAsn1};
use crate::Result;
use vellum_asn1::date::{GeneralizedTime, UtcTime};
use vellum_asn1::tag::Tag;
use vellum_asn1::Asn1Type;

fn push_two_digits(buf: &mut Vec<u8>, value: u8) {
    buf.push(b'0' + value / 10);
    buf.push(b'0' + value % 10);
}

impl ToAsn1 for UtcTime {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.to_asn1_tagged(UtcTime::TAG, ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        ser.write_primitive(tag, |buf| {
            push_two_digits(buf, (self.year() % 100) as u8);
            push_two_digits(buf, self.month());
            push_two_digits(buf, self.day());
            push_two_digits(buf, self.hours());
            push_two_digits(buf, self.minutes());
            push_two_digits(buf, self.seconds());
            buf.push(b'Z');
            Ok(())
        })
    }
}

impl ToAsn1 for GeneralizedTime {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.to_asn1_tagged(GeneralizedTime::TAG, ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        ser.write_primitive(tag, |buf| {
            push_two_digits(buf, (self.year() / 100) as u8);
            push_two_digits(buf, (self.year() % 100) as u8);
            push_two_digits(buf, self.month());
            push_two_digits(buf, self.day());
            push_two_digits(buf, self.hours());
            push_two_digits(buf, self.minutes());
            push_two_digits(buf, self.seconds());
            if !self.fraction_digits().is_empty() {
                buf.push(b'.');
                buf.extend_from_slice(self.fraction_digits());
            }
            buf.push(b'Z');
            Ok(())
        })
    }
}
