//! 参考数据（下拉列表）

use std::collections::HashMap;

/// 参考数据类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Authors,
    Countries,
    Producers,
    Languages,
    Roles,
}

impl ReferenceKind {
    pub const ALL: [ReferenceKind; 5] = [
        ReferenceKind::Authors,
        ReferenceKind::Countries,
        ReferenceKind::Producers,
        ReferenceKind::Languages,
        ReferenceKind::Roles,
    ];

    /// 静态 JSON 文件名
    pub fn file_name(self) -> &'static str {
        match self {
            ReferenceKind::Authors => "csvjson.json",
            ReferenceKind::Countries => "paises.json",
            ReferenceKind::Producers => "productoras.json",
            ReferenceKind::Languages => "idiomas.json",
            ReferenceKind::Roles => "roles.json",
        }
    }

    /// JSON 对象中的标签字段
    pub fn label_key(self) -> &'static str {
        match self {
            ReferenceKind::Authors => "Autor",
            ReferenceKind::Countries => "Pais",
            ReferenceKind::Producers => "Productora",
            ReferenceKind::Languages => "Idioma",
            ReferenceKind::Roles => "Rol",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ReferenceKind::Authors => "作者",
            ReferenceKind::Countries => "国家",
            ReferenceKind::Producers => "制片公司",
            ReferenceKind::Languages => "语言",
            ReferenceKind::Roles => "角色",
        }
    }

    /// 加载失败时使用的默认列表
    pub fn fallback(self) -> &'static [&'static str] {
        match self {
            ReferenceKind::Authors | ReferenceKind::Producers => &[],
            ReferenceKind::Countries => &[
                "Argentina",
                "Bolivia",
                "Chile",
                "Colombia",
                "Costa Rica",
                "Cuba",
                "Ecuador",
                "El Salvador",
                "España",
                "Estados Unidos",
                "Guatemala",
                "Honduras",
                "México",
                "Nicaragua",
                "Panamá",
                "Paraguay",
                "Perú",
                "Puerto Rico",
                "República Dominicana",
                "Uruguay",
                "Venezuela",
            ],
            ReferenceKind::Languages => &[
                "Alemán",
                "Español",
                "Francés",
                "Inglés",
                "Italiano",
                "Portugués",
            ],
            ReferenceKind::Roles => &[
                "Actor",
                "Compositor",
                "Director",
                "Guionista",
                "Productor",
            ],
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 已加载的全部参考列表
#[derive(Debug, Clone, Default)]
pub struct ReferenceLists {
    lists: HashMap<ReferenceKind, Vec<String>>,
}

impl ReferenceLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: ReferenceKind, values: Vec<String>) {
        self.lists.insert(kind, values);
    }

    /// 获取某类列表，未加载时为空
    pub fn get(&self, kind: ReferenceKind) -> &[String] {
        self.lists.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_loaded(&self, kind: ReferenceKind) -> bool {
        self.lists.contains_key(&kind)
    }
}
