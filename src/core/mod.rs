//
//  Copyright (C) 2022-2024  Chase Ruskin
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

pub mod block;
pub mod config;
pub mod context;
pub mod exec;
pub mod fetch;
pub mod fileset;
pub mod libref;
pub mod manifest;
pub mod platform;
pub mod project;
pub mod resolver;
pub mod simulate;
pub mod swap;
pub mod toplevel;
pub mod validate;
pub mod vendor;
pub mod walk;
pub mod waves;
pub mod witness;
