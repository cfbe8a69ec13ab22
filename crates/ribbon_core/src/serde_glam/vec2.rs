use serde::{
    de::{Error, SeqAccess, Visitor},
    Deserialize, Serialize,
};

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vec2(pub glam::Vec2);

impl From<Vec2> for glam::Vec2 {
    fn from(src: Vec2) -> glam::Vec2 {
        src.0
    }
}
impl From<glam::Vec2> for Vec2 {
    fn from(src: glam::Vec2) -> Vec2 {
        Vec2(src)
    }
}

struct Vec2Deserializer;
impl<'de> Visitor<'de> for Vec2Deserializer {
    type Value = Vec2;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a sequence of two floats")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let x: f32 = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(0, &self))?;
        let y: f32 = seq
            .next_element()?
            .ok_or_else(|| A::Error::invalid_length(1, &self))?;
        Ok(Vec2(glam::Vec2 { x, y }))
    }
}

impl Serialize for Vec2 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(&self.0.x)?;
        seq.serialize_element(&self.0.y)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Vec2 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(Vec2Deserializer)
    }
}
